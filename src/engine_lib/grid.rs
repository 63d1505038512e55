// src/engine_lib/grid.rs

use glam::Vec3;
use crate::config::BoardConfig;
use crate::engine_lib::labels::face_label;
use crate::engine_lib::session::Selection;

pub const GRID_SIZE: usize = 4;

/// Label planes sit just outside the cube so they don't z-fight its faces.
pub const LABEL_OFFSET_FACTOR: f32 = 0.501;
pub const LABEL_PLANE_FRACTION: f32 = 0.9;

pub type CellId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl GridCoord {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE && self.z < GRID_SIZE
    }

    /// True when the cell touches the outer shell on any axis.
    pub fn is_boundary(&self) -> bool {
        let edge = |i: usize| i == 0 || i == GRID_SIZE - 1;
        self.in_bounds() && (edge(self.x) || edge(self.y) || edge(self.z))
    }
}

/// All shell coordinates, x-major.
pub fn boundary_coords() -> impl Iterator<Item = GridCoord> {
    (0..GRID_SIZE).flat_map(|x| {
        (0..GRID_SIZE).flat_map(move |y| {
            (0..GRID_SIZE)
                .map(move |z| GridCoord::new(x, y, z))
                .filter(GridCoord::is_boundary)
        })
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cube_size: f32,
    pub gap: f32,
    pub group_offset: Vec3,
}

impl GridLayout {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            cube_size: config.cube_size,
            gap: config.gap,
            group_offset: Vec3::new(0.0, config.group_height, 0.0),
        }
    }

    pub fn total_size(&self) -> f32 {
        GRID_SIZE as f32 * (self.cube_size + self.gap) - self.gap
    }

    /// Cube centre inside the group. x and z are centred on the origin; y
    /// starts at zero so the grid rests on the group's floor.
    pub fn local_position(&self, coord: GridCoord) -> Vec3 {
        let step = self.cube_size + self.gap;
        let half = self.cube_size / 2.0;
        let centring = self.total_size() / 2.0;
        Vec3::new(
            coord.x as f32 * step - centring + half,
            coord.y as f32 * step + half,
            coord.z as f32 * step - centring + half,
        )
    }

    pub fn world_center(&self, coord: GridCoord) -> Vec3 {
        self.group_offset + self.local_position(coord)
    }

    pub fn label_plane_size(&self) -> f32 {
        self.cube_size * LABEL_PLANE_FRACTION
    }
}

/// One of the six label quads attached to a cube, in the cube's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlane {
    pub offset: Vec3,
    pub normal: Vec3,
}

pub fn label_planes(cube_size: f32) -> [LabelPlane; 6] {
    let d = LABEL_OFFSET_FACTOR * cube_size;
    [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
        .map(|normal| LabelPlane { offset: normal * d, normal })
}

#[derive(Clone, Debug, PartialEq)]
pub struct CubeCell {
    pub coord: GridCoord,
    pub position: Vec3,
    pub label: Option<&'static str>,
    pub selection: Selection,
}

pub fn build_cells(layout: &GridLayout) -> Vec<CubeCell> {
    boundary_coords()
        .map(|coord| CubeCell {
            coord,
            position: layout.local_position(coord),
            label: face_label(coord),
            selection: Selection::Unselected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout::from_config(&BoardConfig::default())
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn shell_has_56_cells_and_no_interior() {
        let coords: Vec<_> = boundary_coords().collect();
        assert_eq!(coords.len(), 56);
        assert!(!coords.contains(&GridCoord::new(1, 1, 1)));
        assert!(!coords.contains(&GridCoord::new(2, 1, 2)));
        assert!(coords.iter().all(GridCoord::is_boundary));
    }

    #[test]
    fn total_size_accounts_for_gaps() {
        assert!((layout().total_size() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn positions_follow_size_and_gap() {
        let l = layout();
        assert!(close(l.local_position(GridCoord::new(0, 0, 0)), Vec3::new(-0.375, 0.1, -0.375)));
        assert!(close(l.local_position(GridCoord::new(3, 3, 3)), Vec3::new(0.375, 0.85, 0.375)));
        assert!(close(l.world_center(GridCoord::new(0, 0, 0)), Vec3::new(-0.375, 0.6, -0.375)));
    }

    #[test]
    fn label_planes_straddle_each_face() {
        let planes = label_planes(0.2);
        assert_eq!(planes.len(), 6);
        for plane in planes {
            assert!((plane.offset.length() - 0.1002).abs() < 1e-6);
            assert!(close(plane.offset.normalize(), plane.normal));
        }
    }

    #[test]
    fn built_cells_are_labelled_and_unselected() {
        let cells = build_cells(&layout());
        assert_eq!(cells.len(), 56);
        assert!(cells.iter().all(|c| c.label.is_some()));
        assert!(cells.iter().all(|c| c.selection == Selection::Unselected));
    }
}
