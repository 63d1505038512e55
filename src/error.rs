// src/error.rs

use thiserror::Error;

/// Failures that stop the board from starting. Nothing after bootstrap is
/// fatal except running out of GPU memory.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("could not create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("could not open window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("could not create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("could not open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("canvas host element `{0}` is missing from the page")]
    MissingCanvasHost(String),
}
