// src/engine_lib/labels.rs

use crate::engine_lib::grid::{GridCoord, GRID_SIZE};

const LAST: usize = GRID_SIZE - 1;

/// The six outer faces of the board, in the order they are tested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub const PRIORITY: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    fn contains(self, c: GridCoord) -> bool {
        match self {
            Face::Front => c.z == 0,
            Face::Back => c.z == LAST,
            Face::Left => c.x == 0,
            Face::Right => c.x == LAST,
            Face::Top => c.y == LAST,
            Face::Bottom => c.y == 0,
        }
    }

    /// The face a boundary cell is labelled from. Edge and corner cells lie on
    /// several faces; the first match in `PRIORITY` wins.
    pub fn of(coord: GridCoord) -> Option<Face> {
        if !coord.in_bounds() {
            return None;
        }
        Face::PRIORITY.into_iter().find(|face| face.contains(coord))
    }

    /// (row, column) into this face's table.
    fn table_index(self, c: GridCoord) -> (usize, usize) {
        match self {
            Face::Front | Face::Back => (c.y, c.x),
            Face::Left => (c.y, c.z),
            Face::Right => (c.y, LAST - c.z),
            Face::Top => (c.x, c.z),
            Face::Bottom => (c.x, LAST - c.z),
        }
    }

    fn table(self) -> &'static FaceTable {
        &FACE_TABLES[self as usize]
    }
}

type FaceTable = [[&'static str; GRID_SIZE]; GRID_SIZE];

// Reproduced as authored. "FF", "CC", "XX", "AD" and the trailing "4A" on the
// bottom face look like placeholders; they are shadowed by higher-priority
// faces and never reach a cell.
const FACE_TABLES: [FaceTable; 6] = [
    // Front, z = 0, [y][x]
    [
        ["1D", "2D", "3D", "4D"],
        ["1C", "3C", "2C", "4C"],
        ["1B", "2B", "3B", "4B"],
        ["1A", "2A", "3A", "4A"],
    ],
    // Back, z = 3, [y][x]
    [
        ["13D", "14D", "15D", "16D"],
        ["13C", "14C", "15C", "16C"],
        ["13B", "14B", "15B", "16B"],
        ["13A", "14A", "15A", "16A"],
    ],
    // Left, x = 0, [y][z]
    [
        ["1A", "5D", "9D", "13A"],
        ["1C", "5C", "9C", "13B"],
        ["1B", "5B", "9B", "13C"],
        ["FF", "5A", "9A", "13D"],
    ],
    // Right, x = 3, [y][3 - z]
    [
        ["16A", "12D", "8D", "4A"],
        ["16B", "12C", "8C", "4B"],
        ["16C", "12B", "8B", "4C"],
        ["16D", "12A", "8A", "4D"],
    ],
    // Top, y = 3, [x][z]
    [
        ["1A", "CC", "XX", "4A"],
        ["5A", "6A", "10A", "8A"],
        ["9A", "7A", "11A", "12A"],
        ["13A", "14A", "15A", "16A"],
    ],
    // Bottom, y = 0, [x][3 - z]
    [
        ["13D", "14D", "15D", "16D"],
        ["AD", "10D", "6D", "12D"],
        ["5D", "11D", "7D", "8D"],
        ["1D", "2D", "3D", "4A"],
    ],
];

/// Face-relative label of a boundary cell; `None` for interior or
/// out-of-range coordinates.
pub fn face_label(coord: GridCoord) -> Option<&'static str> {
    let face = Face::of(coord)?;
    let (row, col) = face.table_index(coord);
    Some(face.table()[row][col])
}
