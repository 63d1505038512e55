// src/rendering_lib/mesh.rs

use glam::Vec3;
use super::vertex::Vertex;

/// Unit cube centred on the origin, four vertices per face so normals stay flat.
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for normal in faces {
        // Two axes spanning the face, ordered so the winding is CCW from outside.
        let u = if normal.y.abs() > 0.5 { Vec3::Z } else { Vec3::Y }.cross(normal);
        let v = normal.cross(u);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + u * su + v * sv) * 0.5;
            vertices.push(Vertex::new(p.to_array(), normal.to_array()));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Unit square in the XZ plane facing +y.
pub fn unit_plane() -> (Vec<Vertex>, Vec<u16>) {
    let n = [0.0, 1.0, 0.0];
    let vertices = vec![
        Vertex::new([-0.5, 0.0, 0.5], n),
        Vertex::new([0.5, 0.0, 0.5], n),
        Vertex::new([0.5, 0.0, -0.5], n),
        Vertex::new([-0.5, 0.0, -0.5], n),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Line-list grid on y = 0 spanning `size`, with `divisions` cells per side.
pub fn grid_lines(size: f32, divisions: u32) -> Vec<Vertex> {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let none = [0.0; 3];
    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        vertices.push(Vertex::new([-half, 0.0, k], none));
        vertices.push(Vertex::new([half, 0.0, k], none));
        vertices.push(Vertex::new([k, 0.0, -half], none));
        vertices.push(Vertex::new([k, 0.0, half], none));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_faces_wind_outwards() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(vertices[i as usize].position));
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
            assert!(vertices[tri[0] as usize].position.iter().all(|p| p.abs() == 0.5));
        }
    }

    #[test]
    fn grid_has_two_lines_per_division_step() {
        let lines = grid_lines(20.0, 20);
        assert_eq!(lines.len(), 21 * 4);
        assert_eq!(lines[0].position, [-10.0, 0.0, -10.0]);
        assert_eq!(lines.last().unwrap().position, [10.0, 0.0, 10.0]);
    }
}
