// src/rendering_lib/shader.rs

pub const WGSL_SHADER_SOURCE: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,                 // rgb premultiplied by intensity
    light_dirs: array<vec4<f32>, 3>,    // xyz towards the light
    light_colors: array<vec4<f32>, 3>,  // rgb premultiplied by intensity
}

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) shading: f32,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) shading: f32,
}

@vertex
fn vs_main(model: VertexInput, instance: InstanceInput) -> VertexOutput {
    let transform = mat4x4<f32>(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    var out: VertexOutput;
    out.clip_position = globals.view_proj * transform * vec4<f32>(model.position, 1.0);
    // Transforms are uniform scale + rotation, so the model matrix is fine for normals.
    out.world_normal = (transform * vec4<f32>(model.normal, 0.0)).xyz;
    out.color = instance.color;
    out.shading = instance.shading;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    if (in.shading < 0.5) {
        return in.color;
    }
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }
    var light = globals.ambient.rgb;
    for (var i = 0u; i < 3u; i = i + 1u) {
        light += globals.light_colors[i].rgb * max(dot(n, globals.light_dirs[i].xyz), 0.0);
    }
    return vec4<f32>(in.color.rgb * light, in.color.a);
}
"#;
