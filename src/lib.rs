// src/lib.rs

pub mod app;
pub mod board_scene;
pub mod config;
pub mod engine_lib;
pub mod error;
pub mod rendering_lib;
pub mod ui;

use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};
use app::BoardApp;
use config::AppConfig;
use error::BoardError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Warn);
        } else {
            let _ = env_logger::try_init();
            std::panic::set_hook(Box::new(|info| {
                log::error!("uncaught panic: {info}");
            }));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn attach_canvas(window: &winit::window::Window, host_id: &str) -> Result<(), BoardError> {
    use winit::platform::web::WindowExtWebSys;
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| {
            let dst = doc.get_element_by_id(host_id)?;
            let canvas = web_sys::Element::from(window.canvas()?);
            dst.append_child(&canvas).ok()?;
            Some(())
        })
        .ok_or_else(|| BoardError::MissingCanvasHost(host_id.to_string()))
}

pub async fn run(config: AppConfig) -> Result<(), BoardError> {
    init_logging();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    attach_canvas(&window, &config.window.canvas_host_id)?;

    let mut app_state = BoardApp::new(window.clone(), &config).await?;
    log::info!("board ready");

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => { /* In AboutToWait */ }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app_state.update();
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("surface lost, reconfiguring");
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("surface error: {e:?}"),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run(AppConfig::default()).await {
            log::error!("cube board failed to start: {e}");
        }
    });
}
