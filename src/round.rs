//! Round flow: speed selection, countdown and the end-of-round summary

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, RoundStats};

/// Cycles through the selectable fall-speed multipliers
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSelector {
    steps: Vec<f32>,
    index: usize,
    /// Speed in effect; equals `steps[index]` unless set directly
    current: f32,
}

impl SpeedSelector {
    /// Starts on the first step; an empty list falls back to 1x
    pub fn new(steps: &[f32]) -> Self {
        let steps = if steps.is_empty() {
            vec![1.0]
        } else {
            steps.to_vec()
        };
        let current = steps[0];
        Self {
            steps,
            index: 0,
            current,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance to the next step (wrapping) and return it
    pub fn cycle(&mut self) -> f32 {
        self.index = (self.index + 1) % self.steps.len();
        self.current = self.steps[self.index];
        self.current
    }

    /// Adopt an arbitrary speed; the next `cycle` continues from the
    /// nearest step
    pub fn set(&mut self, speed: f32) {
        self.current = speed;
        self.index = self
            .steps
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (**a - speed).abs().total_cmp(&(**b - speed).abs()))
            .map_or(0, |(i, _)| i);
    }

    /// Button caption, e.g. "Speed: 2x"
    pub fn label(&self) -> String {
        format!("Speed: {}x", self.current())
    }
}

/// Fixed-length round countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimer {
    duration: Duration,
}

impl RoundTimer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left after `elapsed`
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.duration.saturating_sub(elapsed)
    }

    /// Whole seconds left (rounded down)
    pub fn seconds_remaining(&self, elapsed: Duration) -> u64 {
        self.remaining(elapsed).as_secs()
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Timer caption, e.g. "Time: 42 s"
    pub fn label(&self, elapsed: Duration) -> String {
        format!("Time: {} s", self.seconds_remaining(elapsed))
    }
}

/// Final result of a round, handed to the score screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u64,
    #[serde(flatten)]
    pub stats: RoundStats,
    pub ticks: u64,
    pub speed_multiplier: f32,
}

impl RoundSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            stats: state.stats,
            ticks: state.time_ticks,
            speed_multiplier: state.speed_multiplier,
        }
    }

    /// Score screen headline
    pub fn headline(&self) -> String {
        format!("High Score: {}", self.score)
    }
}
