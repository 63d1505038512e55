// src/app.rs

use std::sync::Arc;
use glam::Vec2;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    window::Window,
};
use crate::board_scene::{create_board_scene, BoardScene};
use crate::config::AppConfig;
use crate::engine_lib::camera::Camera;
use crate::engine_lib::controller::OrbitController;
use crate::engine_lib::picking::{pointer_to_ndc, Ray};
use crate::engine_lib::session::{ClickOutcome, Player};
use crate::error::BoardError;
use crate::rendering_lib::renderer::Renderer;
use crate::rendering_lib::shader::WGSL_SHADER_SOURCE;
use crate::ui::{build_ui, paint_labels, HudState};

pub struct BoardApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    scene: BoardScene,
    camera: Camera,
    controller: OrbitController,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    cursor: Option<Vec2>,
}

impl BoardApp {
    pub async fn new(window: Arc<Window>, app_config: &AppConfig) -> Result<Self, BoardError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(BoardError::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults()
        } else {
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter().copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(BoardError::NoAdapter)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = create_board_scene(&app_config.board);
        let renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            config.width, config.height, &scene,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device, config.format, None, 1,
        );

        let camera = Camera::from_config(&app_config.camera, config.width, config.height);
        let controller = OrbitController::new(
            app_config.camera.eye,
            app_config.camera.target,
            camera.fov_y_rad,
            app_config.orbit.clone(),
        );

        Ok(Self {
            surface, device, queue, config, size,
            renderer, scene, camera, controller,
            egui_ctx, egui_state, egui_renderer,
            cursor: None,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, new_size.width, new_size.height);
            self.camera.set_viewport(new_size.width, new_size.height);
        }
    }

    pub fn update(&mut self) {
        self.controller.update();
    }

    fn cursor_ray(&self) -> Option<Ray> {
        let cursor = self.cursor?;
        let ndc = pointer_to_ndc(cursor.x, cursor.y, self.size.width as f32, self.size.height as f32);
        Some(self.camera.ray_through_ndc(self.controller.eye(), self.controller.target(), ndc))
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let eye = self.controller.eye();
        let target = self.controller.target();
        let view_proj = self.camera.view_projection(eye, target);
        self.renderer.render_scene(&self.queue, &mut encoder, &view, &self.scene, view_proj);

        let (width, height) = (self.size.width as f32, self.size.height as f32);
        let sprites = self.scene.label_sprites(&self.camera, eye, target, width, height);
        let session = &self.scene.session;
        let hud = HudState {
            turn: session.turn(),
            hovered_label: session.hovered().and_then(|id| session.cell(id)).and_then(|c| c.label),
            player_one_count: session.selected_count(Player::One),
            player_two_count: session.selected_count(Player::Two),
        };
        let palette = self.scene.palette;

        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            paint_labels(ctx, &sprites, &palette);
            build_ui(ctx, &hud, &palette);
        });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    /// Returns true when the event was fully handled here.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed { return true; }
        if self.controller.handle_window_event(event, self.size.height as f32) { return true; }
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(Vec2::new(position.x as f32, position.y as f32));
                let ray = self.cursor_ray();
                self.scene.pointer_moved(ray.as_ref());
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.scene.pointer_moved(None);
                true
            }
            WindowEvent::MouseInput { state: ElementState::Released, button: MouseButton::Left, .. } => {
                if let Some(ray) = self.cursor_ray() {
                    if let ClickOutcome::AlreadySelected(id) = self.scene.click(&ray) {
                        log::debug!("cube {id} already taken");
                    }
                }
                true
            }
            _ => false,
        }
    }
}
