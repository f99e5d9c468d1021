//! Stochastic spawning of gifts and power-ups

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EntityKind, FallingEntity};
use crate::consts::{GIFT_SPAWN_CHANCE, POWER_UP_SPAWN_CHANCE};

/// Per-tick spawn odds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnOdds {
    /// Gift spawns when a draw from `0..100` is below this
    pub gift_per_hundred: u32,
    /// Power-up spawns when a draw from `0..1000` is below this
    pub power_up_per_thousand: u32,
}

impl Default for SpawnOdds {
    fn default() -> Self {
        Self {
            gift_per_hundred: GIFT_SPAWN_CHANCE,
            power_up_per_thousand: POWER_UP_SPAWN_CHANCE,
        }
    }
}

impl SpawnOdds {
    /// One draw deciding whether `kind` spawns this tick
    pub fn roll(&self, kind: EntityKind, rng: &mut impl Rng) -> bool {
        match kind {
            EntityKind::Gift => rng.random_range(0..100) < self.gift_per_hundred,
            EntityKind::PowerUp => rng.random_range(0..1000) < self.power_up_per_thousand,
        }
    }
}

/// Roll for `kind` and, on success, place it at a random x above the view
pub fn maybe_spawn(
    kind: EntityKind,
    odds: &SpawnOdds,
    view_width: f32,
    rng: &mut impl Rng,
) -> Option<FallingEntity> {
    if !odds.roll(kind, rng) {
        return None;
    }
    // A view narrower than the sprite leaves no room; pin to the left edge
    let range = (view_width - kind.size().x).max(0.0);
    let x = rng.random::<f32>() * range;
    Some(FallingEntity::above_top(kind, x))
}
