//! Gift Catch - a falling-object catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, scoring)
//! - `renderer`: Software canvas and the fixed-order frame painter
//! - `platform`: Render target abstraction (surface validity, frame posting)
//! - `view`: The game view: simulation clock thread and lifecycle
//! - `round`: Round timer, speed selection and the end-of-round summary
//! - `settings`: Data-driven round configuration

pub mod assets;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod round;
pub mod settings;
pub mod sim;
pub mod view;

pub use assets::{Sprite, SpriteKind, SpriteProvider, SpriteSet, TintedSprites};
pub use error::{AssetError, GameError};
pub use input::{PointerEvent, PointerPhase};
pub use round::{RoundSummary, RoundTimer, SpeedSelector};
pub use settings::Settings;
pub use view::GameView;

/// Game configuration constants
pub mod consts {
    /// Delay between simulation ticks in milliseconds (~33 FPS)
    pub const TICK_INTERVAL_MS: u64 = 30;

    /// Round length in milliseconds
    pub const ROUND_DURATION_MS: u64 = 60_000;

    /// Sleigh (basket) sprite size
    pub const BASKET_WIDTH: f32 = 200.0;
    pub const BASKET_HEIGHT: f32 = 100.0;
    /// Gap between the sleigh and the bottom edge of the view
    pub const BASKET_BOTTOM_MARGIN: f32 = 50.0;

    /// Gift sprite size
    pub const GIFT_SIZE: f32 = 50.0;
    /// Power-up sprite size
    pub const POWER_UP_SIZE: f32 = 70.0;

    /// Fall speeds in design units per tick (scaled by the round speed multiplier)
    pub const GIFT_FALL_SPEED: f32 = 10.0;
    pub const POWER_UP_FALL_SPEED: f32 = 8.0;

    /// Gift spawn odds: `GIFT_SPAWN_CHANCE` out of 100 per tick
    pub const GIFT_SPAWN_CHANCE: u32 = 10;
    /// Power-up spawn odds: `POWER_UP_SPAWN_CHANCE` out of 1000 per tick
    pub const POWER_UP_SPAWN_CHANCE: u32 = 2;

    /// Score multiplier granted by a power-up
    pub const POWER_UP_BOOST: u32 = 2;
    /// How long a power-up boost lasts in milliseconds
    pub const POWER_UP_DURATION_MS: u64 = 5_000;

    /// Selectable fall-speed multipliers, cycled by the speed button
    pub const SPEED_STEPS: [f32; 3] = [1.0, 2.0, 5.0];

    /// Score overlay anchor (top-left of the first glyph)
    pub const SCORE_TEXT_X: f32 = 50.0;
    pub const SCORE_TEXT_Y: f32 = 50.0;
    /// Score overlay glyph scale (3x5 glyphs, so 50 px tall)
    pub const SCORE_TEXT_SCALE: u32 = 10;
}
