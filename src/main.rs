// src/main.rs

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    if let Err(e) = cube_board::run(cube_board::config::AppConfig::default()).await {
        log::error!("cube board failed to start: {e}");
        eprintln!("cube board failed to start: {e}");
        std::process::exit(1);
    }
}

// On the web the library's `start` entry point drives everything.
#[cfg(target_arch = "wasm32")]
fn main() {}
