//! Software RGBA frame buffer
//!
//! Sprites are blitted with clipping; fully transparent pixels are skipped,
//! everything else is copied opaque.

use super::font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, lit};
use super::{Canvas, TextStyle};
use crate::assets::{Rgba, Sprite};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change dimensions; contents are cleared to black
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, [0, 0, 0, 255]);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i64).min(self.width as i64);
        let y1 = (y + h as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }
}

impl Canvas for FrameBuffer {
    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let ox = x.floor() as i64;
        let oy = y.floor() as i64;
        // Visible part of the sprite in sprite coordinates
        let sx0 = (-ox).max(0);
        let sy0 = (-oy).max(0);
        let sx1 = (self.width as i64 - ox).min(sprite.width as i64);
        let sy1 = (self.height as i64 - oy).min(sprite.height as i64);
        for sy in sy0..sy1 {
            let row = sy as usize * sprite.width as usize;
            for sx in sx0..sx1 {
                let color = sprite.pixels[row + sx as usize];
                if color[3] == 0 {
                    continue;
                }
                self.put(ox + sx, oy + sy, color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let scale = style.scale.max(1);
        let ox = x.floor() as i64;
        let oy = y.floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            let cx = ox + (i as u32 * GLYPH_ADVANCE * scale) as i64;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if lit(ch, col, row) {
                        self.fill_rect(
                            cx + (col * scale) as i64,
                            oy + (row * scale) as i64,
                            scale,
                            scale,
                            style.color,
                        );
                    }
                }
            }
        }
    }
}
