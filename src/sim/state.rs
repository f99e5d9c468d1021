//! Game state and core simulation types
//!
//! Everything the simulation thread owns between ticks lives here.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::multiplier::ScoreMultiplier;
use super::spawn::SpawnOdds;
use crate::consts::*;
use crate::settings::Settings;

/// Kinds of falling things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Gift,
    PowerUp,
}

impl EntityKind {
    /// Base fall speed in design units per tick
    pub fn fall_speed(&self) -> f32 {
        match self {
            EntityKind::Gift => GIFT_FALL_SPEED,
            EntityKind::PowerUp => POWER_UP_FALL_SPEED,
        }
    }

    /// Sprite size (square)
    pub fn size(&self) -> Vec2 {
        match self {
            EntityKind::Gift => Vec2::splat(GIFT_SIZE),
            EntityKind::PowerUp => Vec2::splat(POWER_UP_SIZE),
        }
    }
}

/// A gift or power-up on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingEntity {
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl FallingEntity {
    /// New entity just above the top edge at horizontal offset `x`
    pub fn above_top(kind: EntityKind, x: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(x, -size.y),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// The player's sleigh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basket {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
        }
    }
}

impl Basket {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Largest x that keeps the basket inside a view of `view_width`
    pub fn max_x(&self, view_width: f32) -> f32 {
        (view_width - self.width).max(0.0)
    }

    /// Set x, clamped into `[0, view_width - width]`
    pub fn set_x_clamped(&mut self, x: f32, view_width: f32) {
        self.x = x.clamp(0.0, self.max_x(view_width));
    }
}

/// Live view dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: f32,
    pub height: f32,
}

/// Catch/miss tallies for the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundStats {
    pub gifts_caught: u32,
    pub gifts_missed: u32,
    pub power_ups_caught: u32,
    pub power_ups_missed: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub view: ViewSize,
    pub basket: Basket,
    /// Falling gifts, insertion order
    pub gifts: Vec<FallingEntity>,
    /// Falling power-ups, insertion order
    pub power_ups: Vec<FallingEntity>,
    /// Score (never decreases)
    pub score: u64,
    pub multiplier: ScoreMultiplier,
    /// Round-level fall speed scalar
    pub speed_multiplier: f32,
    pub spawn_odds: SpawnOdds,
    /// Multiplier granted by a caught power-up
    pub power_up_boost: u32,
    pub power_up_duration: Duration,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Monotonic time of the last tick
    pub now: Duration,
    pub stats: RoundStats,
}

impl GameState {
    /// Create a state with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(&Settings::default(), seed)
    }

    /// Create a state tuned by `settings`
    pub fn with_settings(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            view: ViewSize::default(),
            basket: Basket::default(),
            gifts: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            multiplier: ScoreMultiplier::new(settings.reset_policy),
            speed_multiplier: settings.initial_speed(),
            spawn_odds: settings.spawn,
            power_up_boost: settings.power_up_boost,
            power_up_duration: settings.power_up_duration(),
            time_ticks: 0,
            now: Duration::ZERO,
            stats: RoundStats::default(),
        }
    }

    /// Adopt new view dimensions and park the basket bottom-centre
    pub fn resize(&mut self, width: f32, height: f32) {
        self.view = ViewSize { width, height };
        let centered = width / 2.0 - self.basket.width / 2.0;
        self.basket.set_x_clamped(centered, width);
        self.basket.y = height - self.basket.height - BASKET_BOTTOM_MARGIN;
    }

    /// Number of entities currently falling
    pub fn active_entities(&self) -> usize {
        self.gifts.len() + self.power_ups.len()
    }
}
