//! Frame rendering
//!
//! Full repaint every tick, in a fixed order so layering never changes:
//! background, gifts, power-ups, sleigh, score text.

pub mod font;
pub mod framebuffer;

pub use framebuffer::FrameBuffer;

use crate::assets::{Rgba, Sprite, SpriteSet};
use crate::consts::{SCORE_TEXT_SCALE, SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::GameState;

/// How text is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    /// Pixels per glyph cell
    pub scale: u32,
}

/// Score overlay: white, roughly 50 px tall
pub const SCORE_STYLE: TextStyle = TextStyle {
    color: [255, 255, 255, 255],
    scale: SCORE_TEXT_SCALE,
};

/// Something a frame can be painted onto
pub trait Canvas {
    /// Draw `sprite` with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32);
    /// Draw `text` with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// Paint one complete frame
pub fn render(canvas: &mut dyn Canvas, state: &GameState, sprites: &SpriteSet) {
    canvas.draw_sprite(&sprites.background, 0.0, 0.0);
    for gift in &state.gifts {
        canvas.draw_sprite(&sprites.gift, gift.pos.x, gift.pos.y);
    }
    for power_up in &state.power_ups {
        canvas.draw_sprite(&sprites.power_up, power_up.pos.x, power_up.pos.y);
    }
    canvas.draw_sprite(&sprites.basket, state.basket.x, state.basket.y);
    canvas.draw_text(
        &score_label(state.score),
        SCORE_TEXT_X,
        SCORE_TEXT_Y,
        &SCORE_STYLE,
    );
}

pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}
