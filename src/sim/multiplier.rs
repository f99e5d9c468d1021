//! Score multiplier with timed expiry
//!
//! Expiry deadlines live on the simulation's monotonic timeline and are
//! polled once per tick on the simulation thread, so nothing else ever
//! writes the multiplier.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a new activation interacts with a boost that is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetPolicy {
    /// Each activation queues its own reset; whichever comes due resets the
    /// multiplier to 1, even if a later activation is still running
    #[default]
    Independent,
    /// A new activation replaces the pending reset (last write wins)
    Rearm,
}

/// Current score multiplier and its pending resets
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMultiplier {
    value: u32,
    /// Reset deadlines, in activation order
    pending: Vec<Duration>,
    policy: ResetPolicy,
}

impl Default for ScoreMultiplier {
    fn default() -> Self {
        Self::new(ResetPolicy::default())
    }
}

impl ScoreMultiplier {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            value: 1,
            pending: Vec::new(),
            policy,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Whether any reset is still scheduled
    pub fn is_boosted(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deadline of the next reset to fire, if any
    pub fn next_reset(&self) -> Option<Duration> {
        self.pending.iter().min().copied()
    }

    /// Set the multiplier now and schedule a reset `duration` after `now`
    pub fn activate(&mut self, value: u32, now: Duration, duration: Duration) {
        self.value = value;
        let deadline = now + duration;
        match self.policy {
            ResetPolicy::Independent => self.pending.push(deadline),
            ResetPolicy::Rearm => {
                self.pending.clear();
                self.pending.push(deadline);
            }
        }
    }

    /// Fire every reset due at `now`; returns true if any fired
    ///
    /// A firing reset sets the multiplier back to 1 unconditionally.
    pub fn poll(&mut self, now: Duration) -> bool {
        let before = self.pending.len();
        self.pending.retain(|deadline| *deadline > now);
        let fired = self.pending.len() != before;
        if fired {
            self.value = 1;
        }
        fired
    }
}
