// src/rendering_lib/mod.rs

pub mod renderer;
pub mod shader;
pub mod vertex;
pub mod mesh;

pub use renderer::Renderer;
pub use vertex::{InstanceRaw, Vertex};
pub use shader::WGSL_SHADER_SOURCE;
