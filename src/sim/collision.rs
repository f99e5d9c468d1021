//! Axis-aligned box tests
//!
//! Screen coordinates: x grows right, y grows down.

use glam::Vec2;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Whether a falling entity lands in the basket
///
/// Only the basket's top edge is tested vertically: anything whose bottom
/// edge has reached it while overlapping horizontally counts as caught, even
/// if it has already dropped past the basket.
pub fn caught_by_basket(entity: &Rect, basket: &Rect) -> bool {
    entity.bottom() >= basket.top()
        && entity.right() >= basket.left()
        && entity.left() <= basket.right()
}
