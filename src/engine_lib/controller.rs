// src/engine_lib/controller.rs

use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};
use glam::{Vec2, Vec3};
use crate::config::OrbitConfig;
use crate::engine_lib::camera::view_basis;

const POLAR_EPSILON: f32 = 1e-6;
const ZOOM_STEP: f32 = 0.95;
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    None,
    Rotate,
    Pan,
}

/// Orbits an eye around a target. Input accumulates into deltas that bleed
/// off by `damping_factor` each `update`.
pub struct OrbitController {
    target: Vec3,
    radius: f32,
    azimuth: f32, // around +y, zero looking down -z
    polar: f32,   // from +y

    azimuth_delta: f32,
    polar_delta: f32,
    pan_offset: Vec3,
    zoom_scale: f32,

    fov_y_rad: f32,
    drag: DragMode,
    last_cursor: Option<Vec2>,
    config: OrbitConfig,
}

impl OrbitController {
    pub fn new(eye: Vec3, target: Vec3, fov_y_rad: f32, config: OrbitConfig) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (azimuth, polar) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };
        let mut controller = Self {
            target,
            radius,
            azimuth,
            polar,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            pan_offset: Vec3::ZERO,
            zoom_scale: 1.0,
            fov_y_rad,
            drag: DragMode::None,
            last_cursor: None,
            config,
        };
        controller.clamp();
        controller
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    /// Consumes drags, wheel and arrow keys. Cursor motion is never consumed
    /// so hover picking still sees it.
    pub fn handle_window_event(&mut self, event: &WindowEvent, viewport_height: f32) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let mode = match button {
                    MouseButton::Left => DragMode::Rotate,
                    MouseButton::Right if self.config.enable_pan => DragMode::Pan,
                    _ => return false,
                };
                match state {
                    ElementState::Pressed => self.drag = mode,
                    ElementState::Released if self.drag == mode => self.drag = DragMode::None,
                    ElementState::Released => {}
                }
                // Left release doubles as a click for the board.
                *button != MouseButton::Left
            }
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                if let Some(last) = self.last_cursor {
                    self.drag_by(cursor - last, viewport_height);
                }
                self.last_cursor = Some(cursor);
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor = None;
                self.drag = DragMode::None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_SCROLL_LINE,
                };
                self.zoom(dy);
                true
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state != ElementState::Pressed || !self.config.enable_pan {
                    return false;
                }
                let step = self.config.key_pan_speed;
                let delta = match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::ArrowUp) => Vec2::new(0.0, step),
                    PhysicalKey::Code(KeyCode::ArrowDown) => Vec2::new(0.0, -step),
                    PhysicalKey::Code(KeyCode::ArrowLeft) => Vec2::new(step, 0.0),
                    PhysicalKey::Code(KeyCode::ArrowRight) => Vec2::new(-step, 0.0),
                    _ => return false,
                };
                self.pan(delta, viewport_height);
                true
            }
            _ => false,
        }
    }

    fn drag_by(&mut self, delta: Vec2, viewport_height: f32) {
        match self.drag {
            DragMode::Rotate => self.rotate(delta, viewport_height),
            DragMode::Pan => self.pan(delta, viewport_height),
            DragMode::None => {}
        }
    }

    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let full_turn = std::f32::consts::TAU * self.config.rotate_speed / viewport_height;
        self.azimuth_delta -= delta_px.x * full_turn;
        self.polar_delta -= delta_px.y * full_turn;
    }

    /// Screen-space pan: the target slides in the camera's right/up plane so
    /// that content under the cursor follows it.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let (right, up, _) = view_basis(self.eye(), self.target);
        let target_distance = self.radius * (self.fov_y_rad / 2.0).tan();
        let scale = 2.0 * target_distance * self.config.pan_speed / viewport_height;
        self.pan_offset += -right * (delta_px.x * scale) + up * (delta_px.y * scale);
    }

    /// Positive `lines` (wheel away from the user) moves closer.
    pub fn zoom(&mut self, lines: f32) {
        if lines == 0.0 {
            return;
        }
        let step = ZOOM_STEP.powf(self.config.zoom_speed * lines.abs());
        if lines > 0.0 {
            self.zoom_scale *= step;
        } else {
            self.zoom_scale /= step;
        }
    }

    /// Advances one frame.
    pub fn update(&mut self) {
        let damping = self.config.damping_factor;
        self.azimuth += self.azimuth_delta * damping;
        self.polar += self.polar_delta * damping;
        self.target += self.pan_offset * damping;
        self.radius *= self.zoom_scale;
        self.clamp();

        self.azimuth_delta *= 1.0 - damping;
        self.polar_delta *= 1.0 - damping;
        self.pan_offset *= 1.0 - damping;
        self.zoom_scale = 1.0;
    }

    fn clamp(&mut self) {
        let min_polar = self.config.min_polar.max(POLAR_EPSILON);
        let max_polar = self.config.max_polar.min(std::f32::consts::PI - POLAR_EPSILON);
        self.polar = self.polar.clamp(min_polar, max_polar);
        self.radius = self.radius.clamp(self.config.min_distance, self.config.max_distance);
    }
}
