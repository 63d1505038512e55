// src/engine_lib/camera.rs

use glam::{Mat4, Vec2, Vec3};
use crate::config::CameraConfig;
use crate::engine_lib::picking::Ray;

/// Perspective lens. Where it sits is the orbit controller's business.
#[derive(Debug, Clone)]
pub struct Camera {
    pub fov_y_rad: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(fov_y_deg: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            fov_y_rad: fov_y_deg.to_radians(),
            aspect,
            znear,
            zfar,
        }
    }

    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self::new(config.fov_y_deg, 1.0, config.znear, config.zfar);
        camera.set_viewport(width, height);
        camera
    }

    /// Tracks the window size. Minimised windows report zero; those keep the
    /// previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(eye: Vec3, target: Vec3) -> Mat4 {
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    pub fn view_projection(&self, eye: Vec3, target: Vec3) -> Mat4 {
        self.projection_matrix() * Self::view_matrix(eye, target)
    }

    /// Ray from the eye through a point given in NDC.
    pub fn ray_through_ndc(&self, eye: Vec3, target: Vec3, ndc: Vec2) -> Ray {
        let (right, up, forward) = view_basis(eye, target);
        let half_height = (self.fov_y_rad / 2.0).tan();
        let half_width = half_height * self.aspect;
        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(eye, direction)
    }

    /// World point to window pixels (origin top-left). `None` when the point
    /// is behind the near plane or past the far plane.
    pub fn project_to_screen(
        &self,
        view_proj: &Mat4,
        world_point: Vec3,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<Vec2> {
        let clip = *view_proj * world_point.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z < 0.0 || ndc.z > 1.0 {
            return None;
        }
        let screen_x = (ndc.x + 1.0) * 0.5 * screen_width;
        let screen_y = (1.0 - ndc.y) * 0.5 * screen_height;
        Some(Vec2::new(screen_x, screen_y))
    }

    /// Pixels per world unit at `depth` along the view axis.
    pub fn pixels_per_unit(&self, depth: f32, screen_height: f32) -> f32 {
        if depth <= 1e-6 {
            return 0.0;
        }
        let focal = (screen_height / 2.0) / (self.fov_y_rad / 2.0).tan();
        focal / depth
    }
}

/// Right, up and forward unit vectors of a camera looking from `eye` at `target`.
pub fn view_basis(eye: Vec3, target: Vec3) -> (Vec3, Vec3, Vec3) {
    let forward = (target - eye).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    let up = right.cross(forward);
    (right, up, forward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_sets_exact_aspect() {
        let mut camera = Camera::new(40.0, 1.0, 0.01, 1000.0);
        camera.set_viewport(1920, 1080);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        camera.set_viewport(0, 500);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let camera = Camera::new(40.0, 4.0 / 3.0, 0.01, 1000.0);
        let eye = Vec3::new(3.0, 3.0, 5.0);
        let target = Vec3::new(0.0, 0.5, 0.0);
        let ray = camera.ray_through_ndc(eye, target, Vec2::ZERO);
        assert_eq!(ray.origin, eye);
        let expected = (target - eye).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let camera = Camera::new(40.0, 2.0, 0.01, 1000.0);
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let vp = camera.view_projection(eye, Vec3::ZERO);
        let p = camera.project_to_screen(&vp, Vec3::ZERO, 800.0, 400.0).unwrap();
        assert!((p - Vec2::new(400.0, 200.0)).length() < 1e-3);
        assert_eq!(camera.project_to_screen(&vp, Vec3::new(0.0, 0.0, 10.0), 800.0, 400.0), None);
    }
}
