//! HUD, overlay, floating labels and on-screen D-pad drawing.
//!
//! Everything text-based lives here so the board drawing in the crate root
//! stays free of font metrics.

use macroquad::{
    color::Color,
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_rectangle, draw_triangle},
    text::{draw_text, measure_text},
};
use neon_snake_rendering::{Hud, Label, SceneLayout};

use crate::to_macroquad_color;

const HUD_FONT_SIZE: u16 = 22;
const OVERLAY_FONT_SIZE: u16 = 30;
const LABEL_FONT_SCALE: f32 = 0.6;

/// Draws the score strip above the board.
pub(crate) fn draw_hud(hud: &Hud, layout: &SceneLayout, board: f32) {
    let color = to_macroquad_color(hud.color);
    let baseline = layout.hud_height * 0.65;
    let left = layout.origin.x;
    let right = layout.origin.x + board;

    let _ = draw_text(&hud.score, left, baseline, f32::from(HUD_FONT_SIZE), color);

    let best = measure_text(&hud.best, None, HUD_FONT_SIZE, 1.0);
    let _ = draw_text(
        &hud.best,
        left + (board - best.width) / 2.0,
        baseline,
        f32::from(HUD_FONT_SIZE),
        color,
    );

    let status = format!("{} · {}", hud.mode, hud.rate);
    let status_size = measure_text(&status, None, HUD_FONT_SIZE, 1.0);
    let _ = draw_text(
        &status,
        right - status_size.width,
        baseline,
        f32::from(HUD_FONT_SIZE),
        color,
    );
}

/// Dims the board and centers the overlay text, if any.
pub(crate) fn draw_overlay(hud: &Hud, layout: &SceneLayout, board: f32) {
    let Some(text) = &hud.overlay else {
        return;
    };

    draw_rectangle(
        layout.origin.x,
        layout.origin.y,
        board,
        board,
        Color::new(0.0, 0.0, 0.0, 0.45),
    );
    let size = measure_text(text, None, OVERLAY_FONT_SIZE, 1.0);
    let _ = draw_text(
        text,
        layout.origin.x + (board - size.width) / 2.0,
        layout.origin.y + (board + size.height) / 2.0,
        f32::from(OVERLAY_FONT_SIZE),
        to_macroquad_color(hud.color),
    );
}

/// Draws labels rising from eaten food.
pub(crate) fn draw_labels(labels: &[Label], layout: &SceneLayout) {
    let font_size = (layout.cell_length * LABEL_FONT_SCALE).max(10.0);
    for label in labels {
        let anchor = layout.to_screen(label.position);
        let size = measure_text(&label.text, None, font_size as u16, 1.0);
        let _ = draw_text(
            &label.text,
            anchor.x - size.width / 2.0,
            anchor.y,
            font_size,
            to_macroquad_color(label.color),
        );
    }
}

/// Draws the D-pad buttons with arrows pointing along their headings.
pub(crate) fn draw_dpad(layout: &SceneLayout, color: neon_snake_rendering::Color) {
    let fill = to_macroquad_color(color.fade(0.12));
    let arrow = to_macroquad_color(color.fade(0.8));

    for button in &layout.dpad {
        draw_circle(button.center.x, button.center.y, button.radius, fill);

        let (dx, dy) = button.heading.delta();
        let forward = MacroquadVec2::new(dx as f32, dy as f32);
        let side = MacroquadVec2::new(-forward.y, forward.x);
        let center = MacroquadVec2::new(button.center.x, button.center.y);
        let reach = button.radius * 0.45;
        draw_triangle(
            center + forward * reach,
            center - forward * reach * 0.5 + side * reach,
            center - forward * reach * 0.5 - side * reach,
            arrow,
        );
    }
}
