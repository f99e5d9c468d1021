//! Round settings and tuning
//!
//! Loaded from JSON; every field falls back to the built-in default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{ResetPolicy, SpawnOdds};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Clock ===
    /// Delay between ticks (ms)
    pub tick_interval_ms: u64,
    /// Round length (ms)
    pub round_duration_ms: u64,

    // === Difficulty ===
    /// Selectable fall-speed multipliers; the first one is used at round start
    pub speed_steps: Vec<f32>,
    /// Per-tick spawn odds
    pub spawn: SpawnOdds,

    // === Power-up ===
    /// Score multiplier while a power-up is active
    pub power_up_boost: u32,
    /// Power-up lifetime (ms)
    pub power_up_duration_ms: u64,
    /// How overlapping power-up timers interact
    pub reset_policy: ResetPolicy,

    /// Fixed RNG seed (random per round when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            round_duration_ms: ROUND_DURATION_MS,

            speed_steps: SPEED_STEPS.to_vec(),
            spawn: SpawnOdds::default(),

            power_up_boost: POWER_UP_BOOST,
            power_up_duration_ms: POWER_UP_DURATION_MS,
            reset_policy: ResetPolicy::default(),

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidSettings(
                "tick_interval_ms must be positive".into(),
            ));
        }
        if self.speed_steps.is_empty() {
            return Err(GameError::InvalidSettings(
                "speed_steps must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .speed_steps
            .iter()
            .find(|s| !s.is_finite() || **s <= 0.0)
        {
            return Err(GameError::InvalidSettings(format!(
                "speed step {bad} must be a positive number"
            )));
        }
        if self.power_up_boost == 0 {
            return Err(GameError::InvalidSettings(
                "power_up_boost must be at least 1".into(),
            ));
        }
        if self.spawn.gift_per_hundred > 100 || self.spawn.power_up_per_thousand > 1000 {
            return Err(GameError::InvalidSettings(
                "spawn odds exceed their denominators".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_millis(self.round_duration_ms)
    }

    pub fn power_up_duration(&self) -> Duration {
        Duration::from_millis(self.power_up_duration_ms)
    }

    /// Speed multiplier at round start
    pub fn initial_speed(&self) -> f32 {
        self.speed_steps.first().copied().unwrap_or(1.0)
    }
}
