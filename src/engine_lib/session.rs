// src/engine_lib/session.rs

use crate::config::Palette;
use crate::engine_lib::grid::{CellId, CubeCell};
use crate::engine_lib::visual::{cube_visual, CubeVisual};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn next(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn color(self, palette: &Palette) -> u32 {
        match self {
            Player::One => palette.player_one,
            Player::Two => palette.player_two,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player One",
            Player::Two => "Player Two",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(Player),
}

impl Selection {
    pub fn is_selected(self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: Option<CellId>,
    pub current: Option<CellId>,
}

impl HoverChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected { cell: CellId, player: Player },
    AlreadySelected(CellId),
    Missed,
}

/// Game state shared by the pointer handlers. Owns the cells; the hovered
/// slot is a plain index and never outlives a lookup.
#[derive(Clone, Debug)]
pub struct Session {
    cells: Vec<CubeCell>,
    turn: Player,
    hovered: Option<CellId>,
}

impl Session {
    pub fn new(cells: Vec<CubeCell>) -> Self {
        Self { cells, turn: Player::One, hovered: None }
    }

    pub fn cells(&self) -> &[CubeCell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&CubeCell> {
        self.cells.get(id)
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn hovered(&self) -> Option<CellId> {
        self.hovered
    }

    pub fn is_hovered(&self, id: CellId) -> bool {
        self.hovered == Some(id)
    }

    pub fn selected_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| c.selection == Selection::Selected(player))
            .count()
    }

    pub fn visual(&self, id: CellId, palette: &Palette) -> Option<CubeVisual> {
        let cell = self.cells.get(id)?;
        Some(cube_visual(cell.selection, self.is_hovered(id), palette))
    }

    pub fn pointer_moved(&mut self, hit: Option<CellId>) -> HoverChange {
        let previous = self.hovered;
        let hit = hit.filter(|&id| id < self.cells.len());
        match hit {
            Some(id) if Some(id) != previous => {
                // Leaving the old cube always drops its hover; selected
                // cubes never take it.
                self.hovered = (!self.cells[id].selection.is_selected()).then_some(id);
            }
            Some(_) => {}
            None => self.hovered = None,
        }
        let change = HoverChange { previous, current: self.hovered };
        if change.changed() {
            log::debug!("hover {:?} -> {:?}", change.previous, change.current);
        }
        change
    }

    pub fn click(&mut self, hit: Option<CellId>) -> ClickOutcome {
        let Some(id) = hit.filter(|&id| id < self.cells.len()) else {
            return ClickOutcome::Missed;
        };
        let cell = &mut self.cells[id];
        if cell.selection.is_selected() {
            return ClickOutcome::AlreadySelected(id);
        }
        let player = self.turn;
        cell.selection = Selection::Selected(player);
        log::info!("{} selected {}", player.name(), cell.label.unwrap_or("?"));
        self.turn = player.next();
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        ClickOutcome::Selected { cell: id, player }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::engine_lib::grid::{build_cells, GridLayout};

    fn session() -> Session {
        Session::new(build_cells(&GridLayout::from_config(&BoardConfig::default())))
    }

    #[test]
    fn hover_then_leave_restores_idle() {
        let palette = Palette::default();
        let mut s = session();
        s.pointer_moved(Some(3));
        let hovered = s.visual(3, &palette).unwrap();
        assert_eq!(hovered.color, palette.hover);
        assert_eq!(hovered.label_opacity, 1.0);

        let change = s.pointer_moved(None);
        assert_eq!(change, HoverChange { previous: Some(3), current: None });
        let idle = s.visual(3, &palette).unwrap();
        assert_eq!(idle.color, palette.idle);
        assert_eq!(idle.scale, 1.0);
        assert_eq!(idle.label_opacity, 0.0);
    }

    #[test]
    fn only_one_cube_is_hovered() {
        let mut s = session();
        s.pointer_moved(Some(1));
        s.pointer_moved(Some(2));
        assert!(!s.is_hovered(1));
        assert!(s.is_hovered(2));
        assert_eq!(s.hovered(), Some(2));
    }

    #[test]
    fn repeated_move_over_same_cube_is_stable() {
        let mut s = session();
        s.pointer_moved(Some(5));
        let change = s.pointer_moved(Some(5));
        assert!(!change.changed());
        assert!(s.is_hovered(5));
    }

    #[test]
    fn click_selects_for_current_player_and_flips_turn() {
        let palette = Palette::default();
        let mut s = session();
        s.pointer_moved(Some(7));
        assert_eq!(s.click(Some(7)), ClickOutcome::Selected { cell: 7, player: Player::One });
        assert_eq!(s.turn(), Player::Two);
        assert_eq!(s.hovered(), None);
        assert_eq!(s.visual(7, &palette).unwrap().color, palette.player_one);

        assert_eq!(s.click(Some(7)), ClickOutcome::AlreadySelected(7));
        assert_eq!(s.turn(), Player::Two);
        assert_eq!(s.visual(7, &palette).unwrap().color, palette.player_one);
    }

    #[test]
    fn clicks_on_different_cubes_alternate_colours() {
        let palette = Palette::default();
        let mut s = session();
        s.click(Some(0));
        s.click(Some(1));
        assert_eq!(s.visual(0, &palette).unwrap().color, palette.player_one);
        assert_eq!(s.visual(1, &palette).unwrap().color, palette.player_two);
        assert_eq!(s.turn(), Player::One);
        assert_eq!(s.selected_count(Player::One), 1);
        assert_eq!(s.selected_count(Player::Two), 1);
    }

    #[test]
    fn selected_cube_ignores_hover() {
        let palette = Palette::default();
        let mut s = session();
        s.click(Some(4));
        s.pointer_moved(Some(9));
        s.pointer_moved(Some(4));
        assert_eq!(s.hovered(), None);
        assert!(!s.is_hovered(9));
        assert_eq!(s.visual(4, &palette).unwrap().color, palette.player_one);
    }

    #[test]
    fn misses_and_bad_ids_are_ignored() {
        let mut s = session();
        assert_eq!(s.click(None), ClickOutcome::Missed);
        assert_eq!(s.click(Some(999)), ClickOutcome::Missed);
        assert_eq!(s.turn(), Player::One);
        s.pointer_moved(Some(2));
        s.pointer_moved(Some(999));
        assert_eq!(s.hovered(), None);
    }
}
