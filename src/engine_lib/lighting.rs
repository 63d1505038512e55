// src/engine_lib/lighting.rs

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

/// Parallel light shining from `position` towards the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from a lit surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

pub const MAX_DIRECTIONAL_LIGHTS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: [DirectionalLight; MAX_DIRECTIONAL_LIGHTS],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight { color: 0xffffff, intensity: 0.7 },
            directional: [
                // key
                DirectionalLight { color: 0xffffff, intensity: 0.8, position: Vec3::new(5.0, 10.0, 7.5) },
                DirectionalLight { color: 0xffffff, intensity: 0.5, position: Vec3::new(-5.0, -5.0, -7.5) },
                // fills the underside
                DirectionalLight { color: 0xffffff, intensity: 0.3, position: Vec3::new(0.0, -10.0, 0.0) },
            ],
        }
    }
}
