//! Sprites and the sprite provider seam
//!
//! The game never decodes images itself. A [`SpriteProvider`] hands out
//! pre-rendered RGBA sprites at the sizes the game asks for; failing to get
//! one is fatal for the view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::AssetError;

/// RGBA8 pixel
pub type Rgba = [u8; 4];

/// Which image a sprite stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Background,
    Basket,
    Gift,
    PowerUp,
}

impl SpriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteKind::Background => "background",
            SpriteKind::Basket => "sleigh",
            SpriteKind::Gift => "gift",
            SpriteKind::PowerUp => "power-up",
        }
    }
}

impl fmt::Display for SpriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-rendered image, row-major RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Sprite {
    /// Sprite filled with a single color
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Pixel at (x, y), `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Supplies sprites at a requested pixel size
pub trait SpriteProvider: Send {
    fn acquire(&self, kind: SpriteKind, width: u32, height: u32) -> Result<Sprite, AssetError>;
}

/// Acquire a sprite and reject it unless it is exactly `width`x`height`
/// with one pixel per cell
pub fn acquire_checked(
    provider: &dyn SpriteProvider,
    kind: SpriteKind,
    width: u32,
    height: u32,
) -> Result<Sprite, AssetError> {
    let sprite = provider.acquire(kind, width, height)?;
    let unavailable = |reason: String| AssetError::Unavailable {
        kind,
        width,
        height,
        reason,
    };
    if (sprite.width, sprite.height) != (width, height) {
        return Err(unavailable(format!(
            "provider returned {}x{}",
            sprite.width, sprite.height
        )));
    }
    let expected = width as usize * height as usize;
    if sprite.pixels.len() != expected {
        return Err(unavailable(format!(
            "pixel buffer holds {} pixels, expected {expected}",
            sprite.pixels.len()
        )));
    }
    Ok(sprite)
}

/// Built-in provider that paints tinted placeholder art
///
/// Gifts are tinted red with a ribbon cross, the sleigh green, the power-up
/// gold with a dark rim, and the background a night-sky gradient.
#[derive(Debug, Clone, Default)]
pub struct TintedSprites;

const GIFT_RED: Rgba = [220, 30, 40, 255];
const RIBBON_GOLD: Rgba = [250, 215, 90, 255];
const SLEIGH_GREEN: Rgba = [30, 170, 60, 255];
const POWER_UP_GOLD: Rgba = [255, 200, 0, 255];
const POWER_UP_RIM: Rgba = [140, 90, 0, 255];
const SKY_TOP: Rgba = [8, 12, 40, 255];
const SKY_BOTTOM: Rgba = [40, 60, 110, 255];

impl TintedSprites {
    fn paint(kind: SpriteKind, width: u32, height: u32) -> Sprite {
        match kind {
            SpriteKind::Background => {
                let mut sprite = Sprite::solid(width, height, SKY_TOP);
                for y in 0..height {
                    let t = y as f32 / height.max(1) as f32;
                    let row = lerp_rgba(SKY_TOP, SKY_BOTTOM, t);
                    let start = y as usize * width as usize;
                    sprite.pixels[start..start + width as usize].fill(row);
                }
                sprite
            }
            SpriteKind::Basket => Sprite::solid(width, height, SLEIGH_GREEN),
            SpriteKind::Gift => {
                let mut sprite = Sprite::solid(width, height, GIFT_RED);
                let (cx, cy) = (width / 2, height / 2);
                let band = (width.min(height) / 10).max(1);
                for y in 0..height {
                    for x in 0..width {
                        if x.abs_diff(cx) < band || y.abs_diff(cy) < band {
                            sprite.pixels[(y * width + x) as usize] = RIBBON_GOLD;
                        }
                    }
                }
                sprite
            }
            SpriteKind::PowerUp => {
                let mut sprite = Sprite::solid(width, height, POWER_UP_GOLD);
                let rim = (width.min(height) / 12).max(1);
                for y in 0..height {
                    for x in 0..width {
                        if x < rim || y < rim || x + rim >= width || y + rim >= height {
                            sprite.pixels[(y * width + x) as usize] = POWER_UP_RIM;
                        }
                    }
                }
                sprite
            }
        }
    }
}

impl SpriteProvider for TintedSprites {
    fn acquire(&self, kind: SpriteKind, width: u32, height: u32) -> Result<Sprite, AssetError> {
        Ok(Self::paint(kind, width, height))
    }
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255]
}

/// Every sprite the renderer needs
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub background: Sprite,
    pub basket: Sprite,
    pub gift: Sprite,
    pub power_up: Sprite,
}

impl SpriteSet {
    /// Acquire the fixed-size sprites; the background stays empty until the
    /// view is sized
    pub fn load(provider: &dyn SpriteProvider) -> Result<Self, AssetError> {
        Ok(Self {
            background: Sprite::solid(0, 0, SKY_TOP),
            basket: acquire_checked(
                provider,
                SpriteKind::Basket,
                BASKET_WIDTH as u32,
                BASKET_HEIGHT as u32,
            )?,
            gift: acquire_checked(
                provider,
                SpriteKind::Gift,
                GIFT_SIZE as u32,
                GIFT_SIZE as u32,
            )?,
            power_up: acquire_checked(
                provider,
                SpriteKind::PowerUp,
                POWER_UP_SIZE as u32,
                POWER_UP_SIZE as u32,
            )?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Provider that refuses one kind of sprite
    pub(crate) struct MissingSprite(pub SpriteKind);

    impl SpriteProvider for MissingSprite {
        fn acquire(
            &self,
            kind: SpriteKind,
            width: u32,
            height: u32,
        ) -> Result<Sprite, AssetError> {
            if kind == self.0 {
                Err(AssetError::Unavailable {
                    kind,
                    width,
                    height,
                    reason: "drawable not found".into(),
                })
            } else {
                TintedSprites.acquire(kind, width, height)
            }
        }
    }

    /// Provider whose sprites of one kind come back with a short pixel buffer
    pub(crate) struct TruncatedSprite(pub SpriteKind);

    impl SpriteProvider for TruncatedSprite {
        fn acquire(
            &self,
            kind: SpriteKind,
            width: u32,
            height: u32,
        ) -> Result<Sprite, AssetError> {
            let mut sprite = TintedSprites.acquire(kind, width, height)?;
            if kind == self.0 {
                sprite.pixels.truncate(sprite.pixels.len() / 2);
            }
            Ok(sprite)
        }
    }

    /// Provider that ignores the requested size
    struct FixedSize(u32, u32);

    impl SpriteProvider for FixedSize {
        fn acquire(&self, kind: SpriteKind, _: u32, _: u32) -> Result<Sprite, AssetError> {
            TintedSprites.acquire(kind, self.0, self.1)
        }
    }

    #[test]
    fn test_sprite_set_uses_fixed_sizes() {
        let set = SpriteSet::load(&TintedSprites).unwrap();
        assert_eq!((set.basket.width, set.basket.height), (200, 100));
        assert_eq!((set.gift.width, set.gift.height), (50, 50));
        assert_eq!((set.power_up.width, set.power_up.height), (70, 70));
        assert!(set.background.is_empty());
    }

    #[test]
    fn test_gift_is_tinted_red_with_ribbon() {
        let gift = TintedSprites.acquire(SpriteKind::Gift, 50, 50).unwrap();
        assert_eq!(gift.pixel(2, 2), Some(GIFT_RED));
        assert_eq!(gift.pixel(25, 2), Some(RIBBON_GOLD));
        assert_eq!(gift.pixel(50, 0), None);
    }

    #[test]
    fn test_background_gradient_spans_view() {
        let bg = TintedSprites
            .acquire(SpriteKind::Background, 4, 100)
            .unwrap();
        assert_eq!(bg.pixels.len(), 400);
        assert_eq!(bg.pixel(0, 0), Some(SKY_TOP));
        let bottom = bg.pixel(3, 99).unwrap();
        assert!(bottom[2] > SKY_TOP[2]);
    }

    #[test]
    fn test_zero_sized_background_is_allowed() {
        let bg = TintedSprites.acquire(SpriteKind::Background, 0, 0).unwrap();
        assert!(bg.is_empty());
    }

    #[test]
    fn test_missing_sprite_fails_load() {
        let err = SpriteSet::load(&MissingSprite(SpriteKind::PowerUp)).unwrap_err();
        assert!(err.to_string().contains("power-up"));
        assert!(err.to_string().contains("70x70"));
    }

    #[test]
    fn test_short_pixel_buffer_fails_load() {
        let err = SpriteSet::load(&TruncatedSprite(SpriteKind::Gift)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gift"));
        assert!(msg.contains("holds 1250 pixels, expected 2500"));
    }

    #[test]
    fn test_wrong_size_fails_load() {
        let err = SpriteSet::load(&FixedSize(10, 10)).unwrap_err();
        assert!(err.to_string().contains("provider returned 10x10"));
    }

    #[test]
    fn test_checked_acquire_accepts_empty_sprite() {
        let bg = acquire_checked(&TintedSprites, SpriteKind::Background, 0, 0).unwrap();
        assert!(bg.pixels.is_empty());
    }
}
