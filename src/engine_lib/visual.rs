// src/engine_lib/visual.rs

use crate::config::Palette;
use crate::engine_lib::session::Selection;

pub const HOVER_SCALE: f32 = 1.1;

/// What the renderer needs to draw one cube. Derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeVisual {
    pub color: u32,
    pub scale: f32,
    pub label_opacity: f32,
}

pub fn cube_visual(selection: Selection, hovered: bool, palette: &Palette) -> CubeVisual {
    match selection {
        Selection::Selected(player) => CubeVisual {
            color: player.color(palette),
            scale: 1.0,
            label_opacity: 1.0,
        },
        Selection::Unselected if hovered => CubeVisual {
            color: palette.hover,
            scale: HOVER_SCALE,
            label_opacity: 1.0,
        },
        Selection::Unselected => CubeVisual {
            color: palette.idle,
            scale: 1.0,
            label_opacity: 0.0,
        },
    }
}
