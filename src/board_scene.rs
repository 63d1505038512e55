// src/board_scene.rs

use glam::{Mat4, Vec2, Vec3};
use crate::config::{BoardConfig, Palette};
use crate::engine_lib::camera::Camera;
use crate::engine_lib::grid::{build_cells, label_planes, CellId, GridLayout, LabelPlane};
use crate::engine_lib::lighting::LightRig;
use crate::engine_lib::picking::{pick_nearest, Aabb, Ray};
use crate::engine_lib::session::{ClickOutcome, HoverChange, Session};

/// Translucent floor under the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub size: f32,
    pub height: f32,
    pub color: u32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub color: u32,
}

/// A label to draw this frame, already in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelSprite {
    pub text: &'static str,
    pub screen_pos: Vec2,
    pub height_px: f32,
    pub opacity: f32,
}

// Label glyphs fill roughly this fraction of their plane.
const LABEL_TEXT_FRACTION: f32 = 24.0 / 64.0;

pub struct BoardScene {
    pub layout: GridLayout,
    pub palette: Palette,
    pub session: Session,
    pub lights: LightRig,
    pub ground: GroundPlane,
    pub grid_helper: GridHelper,
    label_planes: [LabelPlane; 6],
}

pub fn create_board_scene(config: &BoardConfig) -> BoardScene {
    let layout = GridLayout::from_config(config);
    let session = Session::new(build_cells(&layout));
    log::info!("board built with {} shell cubes", session.cells().len());
    BoardScene {
        layout,
        palette: config.palette,
        session,
        lights: LightRig::default(),
        ground: GroundPlane {
            size: 10.0,
            height: -0.05,
            color: config.palette.ground,
            opacity: 0.2,
        },
        grid_helper: GridHelper {
            size: 20.0,
            divisions: 20,
            color: config.palette.grid_lines,
        },
        label_planes: label_planes(layout.cube_size),
    }
}

impl BoardScene {
    pub fn cell_center(&self, id: CellId) -> Option<Vec3> {
        let cell = self.session.cell(id)?;
        Some(self.layout.group_offset + cell.position)
    }

    /// World transform of a cube, including its hover scale.
    pub fn cell_transform(&self, id: CellId) -> Option<Mat4> {
        let center = self.cell_center(id)?;
        let visual = self.session.visual(id, &self.palette)?;
        Some(Mat4::from_translation(center) * Mat4::from_scale(Vec3::splat(self.layout.cube_size * visual.scale)))
    }

    pub fn cell_bounds(&self, id: CellId) -> Option<Aabb> {
        let center = self.cell_center(id)?;
        let visual = self.session.visual(id, &self.palette)?;
        Some(Aabb::from_center_half_extent(center, self.layout.cube_size * visual.scale / 2.0))
    }

    /// Nearest cube along `ray`. Label planes are not pick targets.
    pub fn pick(&self, ray: &Ray) -> Option<CellId> {
        self.pick_with_distance(ray).map(|(id, _)| id)
    }

    pub fn pick_with_distance(&self, ray: &Ray) -> Option<(CellId, f32)> {
        let boxes = (0..self.session.cells().len())
            .filter_map(|id| self.cell_bounds(id).map(|aabb| (id, aabb)));
        pick_nearest(ray, boxes)
    }

    pub fn pointer_moved(&mut self, ray: Option<&Ray>) -> HoverChange {
        let hit = ray.and_then(|r| self.pick(r));
        self.session.pointer_moved(hit)
    }

    pub fn click(&mut self, ray: &Ray) -> ClickOutcome {
        let hit = self.pick(ray);
        self.session.click(hit)
    }

    /// Labels with non-zero opacity on planes that face the eye and aren't
    /// hidden behind another cube.
    pub fn label_sprites(
        &self,
        camera: &Camera,
        eye: Vec3,
        target: Vec3,
        screen_width: f32,
        screen_height: f32,
    ) -> Vec<LabelSprite> {
        let view_proj = camera.view_projection(eye, target);
        let forward = (target - eye).normalize_or_zero();
        let mut sprites = Vec::new();

        for (id, cell) in self.session.cells().iter().enumerate() {
            let (Some(text), Some(visual)) = (cell.label, self.session.visual(id, &self.palette)) else {
                continue;
            };
            if visual.label_opacity <= 0.0 {
                continue;
            }
            let center = self.layout.group_offset + cell.position;
            for plane in &self.label_planes {
                let anchor = center + plane.offset * visual.scale;
                if plane.normal.dot(eye - anchor) <= 0.0 {
                    continue;
                }
                let sight = Ray::new(eye, anchor - eye);
                let anchor_distance = (anchor - eye).length();
                if let Some((blocker, t)) = self.pick_with_distance(&sight) {
                    if blocker != id && t < anchor_distance {
                        continue;
                    }
                }
                let Some(screen_pos) = camera.project_to_screen(&view_proj, anchor, screen_width, screen_height) else {
                    continue;
                };
                let depth = (anchor - eye).dot(forward);
                let plane_px = camera.pixels_per_unit(depth, screen_height)
                    * self.layout.label_plane_size()
                    * visual.scale;
                sprites.push(LabelSprite {
                    text,
                    screen_pos,
                    height_px: plane_px * LABEL_TEXT_FRACTION,
                    opacity: visual.label_opacity,
                });
            }
        }
        sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_lib::grid::GridCoord;

    fn scene() -> BoardScene {
        create_board_scene(&BoardConfig::default())
    }

    fn id_of(scene: &BoardScene, coord: GridCoord) -> CellId {
        scene.session.cells().iter().position(|c| c.coord == coord).unwrap()
    }

    #[test]
    fn ray_from_front_picks_front_cube() {
        let s = scene();
        let id = id_of(&s, GridCoord::new(1, 2, 3));
        let center = s.cell_center(id).unwrap();
        let ray = Ray::new(center + Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(s.pick(&ray), Some(id));
    }

    #[test]
    fn ray_through_gap_misses() {
        let s = scene();
        // x = -0.25 runs between the first and second columns.
        let ray = Ray::new(Vec3::new(-0.25, 1.0, 5.0), Vec3::NEG_Z);
        assert_eq!(s.pick(&ray), None);
    }

    #[test]
    fn hover_scale_grows_pick_box() {
        let mut s = scene();
        let id = id_of(&s, GridCoord::new(0, 0, 3));
        let before = s.cell_bounds(id).unwrap();
        let center = s.cell_center(id).unwrap();
        s.pointer_moved(Some(&Ray::new(center + Vec3::Z * 5.0, Vec3::NEG_Z)));
        assert!(s.session.is_hovered(id));
        let after = s.cell_bounds(id).unwrap();
        assert!(after.max.x - after.min.x > before.max.x - before.min.x);
    }

    #[test]
    fn labels_only_for_revealed_cubes() {
        let mut s = scene();
        let camera = Camera::new(40.0, 1.0, 0.01, 1000.0);
        let id = id_of(&s, GridCoord::new(1, 1, 3));
        let center = s.cell_center(id).unwrap();
        // Head-on, so only the +z label plane faces the eye.
        let eye = center + Vec3::Z * 5.0;
        let target = center;
        assert!(s.label_sprites(&camera, eye, target, 600.0, 600.0).is_empty());

        s.click(&Ray::new(eye, Vec3::NEG_Z));
        let sprites = s.label_sprites(&camera, eye, target, 600.0, 600.0);
        assert_eq!(sprites.len(), 1);
        assert_eq!(Some(sprites[0].text), s.session.cell(id).unwrap().label);
        assert!(sprites[0].height_px > 0.0);
    }
}
