//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through `TickInput`, never from the system clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod multiplier;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, caught_by_basket};
pub use multiplier::{ResetPolicy, ScoreMultiplier};
pub use spawn::{SpawnOdds, maybe_spawn};
pub use state::{Basket, EntityKind, FallingEntity, GameState, RoundStats, ViewSize};
pub use tick::{TickInput, TickReport, tick};
