// src/engine_lib/picking.rs

use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // unit length
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extent(center: Vec3, half: f32) -> Self {
        Self { min: center - Vec3::splat(half), max: center + Vec3::splat(half) }
    }

    /// Slab test. Returns the entry distance along the ray, or zero when the
    /// origin is already inside.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.direction.recip();
        let t1 = (self.min - ray.origin) * inv;
        let t2 = (self.max - ray.origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();
        if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Window pixel coordinates to normalized device coordinates, +y up.
pub fn pointer_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Nearest box hit by `ray`, with its distance.
pub fn pick_nearest<K>(ray: &Ray, boxes: impl IntoIterator<Item = (K, Aabb)>) -> Option<(K, f32)> {
    boxes
        .into_iter()
        .filter_map(|(key, aabb)| aabb.intersect(ray).map(|t| (key, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
