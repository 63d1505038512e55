// src/config.rs

use glam::Vec3;

/// Everything the board needs at startup. `Default` holds the shipped values.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Id of the DOM element that hosts the canvas on wasm32.
    pub canvas_host_id: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cube Board".to_string(),
            width: 1024,
            height: 768,
            canvas_host_id: "board-viewport".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub cube_size: f32,
    pub gap: f32,
    /// Height the whole cube group is lifted by.
    pub group_height: f32,
    pub palette: Palette,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cube_size: 0.2,
            gap: 0.05,
            group_height: 0.5,
            palette: Palette::default(),
        }
    }
}

/// Colours as 0xRRGGBB in sRGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub idle: u32,
    pub hover: u32,
    pub player_one: u32,
    pub player_two: u32,
    pub background: u32,
    pub ground: u32,
    pub grid_lines: u32,
    pub label_text: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: 0xaaaaaa,
            hover: 0x888888,
            player_one: 0x4444ff,
            player_two: 0xff4444,
            background: 0x111111,
            ground: 0xaaaaaa,
            grid_lines: 0x555555,
            label_text: 0xffffff,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fov_y_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 40.0,
            znear: 0.01,
            zfar: 1000.0,
            eye: Vec3::new(3.0, 3.0, 5.0),
            target: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrbitConfig {
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Pixels panned per arrow-key press.
    pub key_pan_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            min_distance: 1.0,
            max_distance: 20.0,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            key_pan_speed: 7.0,
        }
    }
}

/// Converts a 0xRRGGBB sRGB colour into linear RGBA for the shader.
pub fn hex_to_linear_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), alpha]
}

/// Same as [`hex_to_linear_rgba`] but keeps the sRGB encoding (egui wants that).
pub fn hex_to_srgb_bytes(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
