// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::mesh::{grid_lines, unit_cube, unit_plane};
use super::vertex::{InstanceRaw, Vertex};
use crate::board_scene::BoardScene;
use crate::config::hex_to_linear_rgba;
use crate::engine_lib::lighting::{LightRig, MAX_DIRECTIONAL_LIGHTS};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    light_dirs: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    light_colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

impl GlobalsUniform {
    fn new(view_proj: Mat4, lights: &LightRig) -> Self {
        let scaled = |hex: u32, intensity: f32| {
            let [r, g, b, _] = hex_to_linear_rgba(hex, 1.0);
            [r * intensity, g * intensity, b * intensity, 1.0]
        };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            ambient: scaled(lights.ambient.color, lights.ambient.intensity),
            light_dirs: lights.directional.map(|l| l.to_light().extend(0.0).to_array()),
            light_colors: lights.directional.map(|l| scaled(l.color, l.intensity)),
        }
    }
}

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
}

impl Mesh {
    fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: Option<&[u16]>) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        let count = indices.map_or(vertices.len(), <[u16]>::len) as u32;
        Self { vertex_buffer, index_buffer, count }
    }

    fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, instances: std::ops::Range<u32>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.count, 0, instances);
            }
            None => pass.draw(0..self.count, instances),
        }
    }
}

/// Draws the board: opaque cubes, then the grid helper, then the
/// translucent ground.
pub struct Renderer {
    cube_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,

    cube_mesh: Mesh,
    plane_mesh: Mesh,
    grid_mesh: Mesh,

    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    frame_instances: Vec<InstanceRaw>,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    depth_view: wgpu::TextureView,
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader_module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    depth_write_enabled: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader_module,
            entry_point: "vs_main",
            buffers: &[Vertex::desc(), InstanceRaw::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader_module,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        width: u32,
        height: u32,
        scene: &BoardScene,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Board Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let globals = GlobalsUniform::new(Mat4::IDENTITY, &scene.lights);
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Uniform Buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("globals_bind_group_layout"),
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &globals_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Board Pipeline Layout"),
            bind_group_layouts: &[&globals_bind_group_layout],
            push_constant_ranges: &[],
        });

        let cube_pipeline = create_pipeline(
            device, "Cube Pipeline", &pipeline_layout, &shader_module, surface_format,
            wgpu::PrimitiveTopology::TriangleList, true,
        );
        let line_pipeline = create_pipeline(
            device, "Grid Line Pipeline", &pipeline_layout, &shader_module, surface_format,
            wgpu::PrimitiveTopology::LineList, true,
        );
        let translucent_pipeline = create_pipeline(
            device, "Translucent Pipeline", &pipeline_layout, &shader_module, surface_format,
            wgpu::PrimitiveTopology::TriangleList, false,
        );

        let (cube_vertices, cube_indices) = unit_cube();
        let (plane_vertices, plane_indices) = unit_plane();
        let grid_vertices = grid_lines(scene.grid_helper.size, scene.grid_helper.divisions);

        // One slot per cube plus the ground and the grid.
        let instance_capacity = scene.session.cells().len() + 2;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (instance_capacity * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            cube_pipeline,
            line_pipeline,
            translucent_pipeline,
            cube_mesh: Mesh::new(device, "Cube Mesh", &cube_vertices, Some(&cube_indices)),
            plane_mesh: Mesh::new(device, "Ground Mesh", &plane_vertices, Some(&plane_indices)),
            grid_mesh: Mesh::new(device, "Grid Mesh", &grid_vertices, None),
            instance_buffer,
            instance_capacity,
            frame_instances: Vec::with_capacity(instance_capacity),
            globals_buffer,
            globals_bind_group,
            depth_view: create_depth_view(device, width, height),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = create_depth_view(device, width, height);
    }

    pub fn render_scene(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        scene: &BoardScene,
        view_proj: Mat4,
    ) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsUniform::new(view_proj, &scene.lights)),
        );

        build_instances(scene, &mut self.frame_instances);
        if self.frame_instances.len() > self.instance_capacity {
            log::warn!(
                "frame has {} instances but buffer holds {}; extra cubes are dropped",
                self.frame_instances.len(),
                self.instance_capacity
            );
            self.frame_instances.truncate(self.instance_capacity);
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.frame_instances));

        let total = self.frame_instances.len() as u32;
        let cubes = total.saturating_sub(2);
        let clear_color = {
            let [r, g, b, _] = hex_to_linear_rgba(scene.palette.background, 1.0);
            wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: 1.0 }
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Board Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        render_pass.set_pipeline(&self.cube_pipeline);
        self.cube_mesh.draw(&mut render_pass, 0..cubes);

        render_pass.set_pipeline(&self.line_pipeline);
        self.grid_mesh.draw(&mut render_pass, cubes + 1..cubes + 2);

        render_pass.set_pipeline(&self.translucent_pipeline);
        self.plane_mesh.draw(&mut render_pass, cubes..cubes + 1);
    }
}

/// Cube instances first, then the ground, then the grid helper.
pub fn build_instances(scene: &BoardScene, out: &mut Vec<InstanceRaw>) {
    out.clear();
    for id in 0..scene.session.cells().len() {
        let (Some(model), Some(visual)) = (scene.cell_transform(id), scene.session.visual(id, &scene.palette)) else {
            continue;
        };
        out.push(InstanceRaw::new(model, hex_to_linear_rgba(visual.color, 1.0), true));
    }

    let ground = &scene.ground;
    let ground_model = Mat4::from_translation(Vec3::new(0.0, ground.height, 0.0))
        * Mat4::from_scale(Vec3::new(ground.size, 1.0, ground.size));
    out.push(InstanceRaw::new(ground_model, hex_to_linear_rgba(ground.color, ground.opacity), true));

    out.push(InstanceRaw::new(Mat4::IDENTITY, hex_to_linear_rgba(scene.grid_helper.color, 1.0), false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_scene::create_board_scene;
    use crate::config::BoardConfig;

    #[test]
    fn instances_track_cube_visuals() {
        let mut scene = create_board_scene(&BoardConfig::default());
        let mut instances = Vec::new();
        build_instances(&scene, &mut instances);
        assert_eq!(instances.len(), 56 + 2);
        let idle = hex_to_linear_rgba(scene.palette.idle, 1.0);
        assert!(instances[..56].iter().all(|i| i.color == idle));

        scene.session.click(Some(0));
        build_instances(&scene, &mut instances);
        assert_eq!(instances[0].color, hex_to_linear_rgba(scene.palette.player_one, 1.0));
        assert_eq!(instances[56].color[3], 0.2);
        assert_eq!(instances[57].shading, 0.0);
    }

    #[test]
    fn globals_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
    }
}
