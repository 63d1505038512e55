// src/engine_lib/mod.rs
pub mod grid;
pub mod labels;
pub mod session;
pub mod visual;
pub mod picking;
pub mod camera;
pub mod controller; // orbit input handling
pub mod lighting;

pub use grid::{CellId, CubeCell, GridCoord, GridLayout, GRID_SIZE};
pub use labels::{face_label, Face};
pub use session::{ClickOutcome, HoverChange, Player, Selection, Session};
pub use visual::{cube_visual, CubeVisual};
pub use picking::{pick_nearest, pointer_to_ndc, Aabb, Ray};
pub use camera::Camera;
pub use controller::OrbitController;
pub use lighting::LightRig;
