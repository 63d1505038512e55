// tests/interaction.rs
//
// Drives the pointer path the app uses (pixels -> NDC -> camera ray -> pick ->
// session) without a window or GPU.

use cube_board::board_scene::{create_board_scene, BoardScene};
use cube_board::config::{AppConfig, Palette};
use cube_board::engine_lib::{
    pointer_to_ndc, Camera, CellId, ClickOutcome, GridCoord, OrbitController, Player, Ray,
};
use glam::{Vec2, Vec3};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

struct Harness {
    scene: BoardScene,
    camera: Camera,
    eye: Vec3,
    target: Vec3,
}

impl Harness {
    /// Camera looking straight at the z = 3 face.
    fn head_on() -> Self {
        let config = AppConfig::default();
        let scene = create_board_scene(&config.board);
        let camera = Camera::from_config(&config.camera, WIDTH as u32, HEIGHT as u32);
        let target = Vec3::new(0.0, 0.975, 0.0);
        Self { scene, camera, eye: target + Vec3::Z * 4.0, target }
    }

    fn id_of(&self, coord: GridCoord) -> CellId {
        self.scene.session.cells().iter().position(|c| c.coord == coord).unwrap()
    }

    fn pixel_of(&self, id: CellId) -> Vec2 {
        let vp = self.camera.view_projection(self.eye, self.target);
        let center = self.scene.cell_center(id).unwrap();
        self.camera.project_to_screen(&vp, center, WIDTH, HEIGHT).unwrap()
    }

    fn ray_at(&self, pixel: Vec2) -> Ray {
        let ndc = pointer_to_ndc(pixel.x, pixel.y, WIDTH, HEIGHT);
        self.camera.ray_through_ndc(self.eye, self.target, ndc)
    }

    fn hover(&mut self, pixel: Vec2) {
        let ray = self.ray_at(pixel);
        self.scene.pointer_moved(Some(&ray));
    }

    fn click(&mut self, pixel: Vec2) -> ClickOutcome {
        let ray = self.ray_at(pixel);
        self.scene.click(&ray)
    }
}

#[test]
fn projected_cube_centre_picks_that_cube() {
    let h = Harness::head_on();
    for coord in [GridCoord::new(0, 0, 3), GridCoord::new(2, 1, 3), GridCoord::new(3, 3, 3)] {
        let id = h.id_of(coord);
        assert_eq!(h.scene.pick(&h.ray_at(h.pixel_of(id))), Some(id), "{coord:?}");
    }
}

#[test]
fn hover_and_leave_round_trip() {
    let palette = Palette::default();
    let mut h = Harness::head_on();
    let id = h.id_of(GridCoord::new(1, 2, 3));

    h.hover(h.pixel_of(id));
    assert_eq!(h.scene.session.hovered(), Some(id));
    assert_eq!(h.scene.session.visual(id, &palette).unwrap().label_opacity, 1.0);

    // Top-left corner of the window sees only background.
    h.hover(Vec2::new(1.0, 1.0));
    assert_eq!(h.scene.session.hovered(), None);
    let visual = h.scene.session.visual(id, &palette).unwrap();
    assert_eq!(visual.color, palette.idle);
    assert_eq!(visual.label_opacity, 0.0);
}

#[test]
fn alternating_clicks_colour_cubes_per_player() {
    let palette = Palette::default();
    let mut h = Harness::head_on();
    let first = h.id_of(GridCoord::new(0, 1, 3));
    let second = h.id_of(GridCoord::new(3, 2, 3));

    let p1 = h.pixel_of(first);
    h.hover(p1);
    assert_eq!(h.click(p1), ClickOutcome::Selected { cell: first, player: Player::One });
    assert_eq!(h.click(p1), ClickOutcome::AlreadySelected(first));

    let p2 = h.pixel_of(second);
    assert_eq!(h.click(p2), ClickOutcome::Selected { cell: second, player: Player::Two });

    assert_eq!(h.scene.session.visual(first, &palette).unwrap().color, palette.player_one);
    assert_eq!(h.scene.session.visual(second, &palette).unwrap().color, palette.player_two);
    assert_eq!(h.scene.session.turn(), Player::One);

    // A taken cube no longer lights up under the pointer.
    h.hover(p1);
    assert_eq!(h.scene.session.hovered(), None);
}

#[test]
fn default_orbit_view_hits_the_board() {
    let config = AppConfig::default();
    let scene = create_board_scene(&config.board);
    let camera = Camera::from_config(&config.camera, WIDTH as u32, HEIGHT as u32);
    let controller = OrbitController::new(
        config.camera.eye,
        config.camera.target,
        camera.fov_y_rad,
        config.orbit.clone(),
    );
    let hits = (0..HEIGHT as u32)
        .step_by(10)
        .flat_map(|y| (0..WIDTH as u32).step_by(10).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let ndc = pointer_to_ndc(x as f32, y as f32, WIDTH, HEIGHT);
            let ray = camera.ray_through_ndc(controller.eye(), controller.target(), ndc);
            scene.pick(&ray).is_some()
        })
        .count();
    assert!(hits > 0);
}

#[test]
fn resize_tracks_window_aspect() {
    let mut camera = Camera::from_config(&AppConfig::default().camera, 1024, 768);
    camera.set_viewport(1280, 720);
    assert_eq!(camera.aspect, 1280.0 / 720.0);
}
