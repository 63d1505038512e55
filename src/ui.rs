// src/ui.rs
use egui;

use crate::board_scene::LabelSprite;
use crate::config::{hex_to_srgb_bytes, Palette};
use crate::engine_lib::session::Player;

/// What the overlay shows this frame.
pub struct HudState<'a> {
    pub turn: Player,
    pub hovered_label: Option<&'a str>,
    pub player_one_count: usize,
    pub player_two_count: usize,
}

fn player_color(player: Player, palette: &Palette) -> egui::Color32 {
    let [r, g, b] = hex_to_srgb_bytes(player.color(palette));
    egui::Color32::from_rgb(r, g, b)
}

pub fn build_ui(ctx: &egui::Context, hud: &HudState, palette: &Palette) {
    egui::Window::new("Cube Board")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.colored_label(
                    player_color(hud.turn, palette),
                    format!("{} to move", hud.turn.name()),
                );
                ui.label(format!("Hovering: {}", hud.hovered_label.unwrap_or("-")));
                ui.label(format!(
                    "Selected: {} / {}",
                    hud.player_one_count, hud.player_two_count
                ));
                ui.separator();

                ui.label("🎮 Controls:");
                ui.label("   Left click: Select cube");
                ui.label("   Left drag: Orbit");
                ui.label("   Right drag / Arrow Keys: Pan");
                ui.label("   Wheel: Zoom");
            });
        });
}

/// Paints label text over the 3D view. Sprite positions are window pixels.
pub fn paint_labels(ctx: &egui::Context, sprites: &[LabelSprite], palette: &Palette) {
    let pixels_per_point = ctx.pixels_per_point();
    let painter = ctx.layer_painter(egui::LayerId::background());
    let [r, g, b] = hex_to_srgb_bytes(palette.label_text);
    for sprite in sprites {
        let alpha = (sprite.opacity.clamp(0.0, 1.0) * 255.0) as u8;
        let pos = egui::pos2(
            sprite.screen_pos.x / pixels_per_point,
            sprite.screen_pos.y / pixels_per_point,
        );
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            sprite.text,
            egui::FontId::proportional((sprite.height_px / pixels_per_point).max(1.0)),
            egui::Color32::from_rgba_unmultiplied(r, g, b, alpha),
        );
    }
}
