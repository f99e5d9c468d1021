//! Per-frame simulation tick
//!
//! One tick: expire boosts, let everything fall, catch or drop it, maybe
//! spawn more. Gifts are processed (and spawned) before power-ups.

use std::time::Duration;

use super::collision::{Rect, caught_by_basket};
use super::spawn::maybe_spawn;
use super::state::{EntityKind, FallingEntity, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Monotonic time since the view was created
    pub now: Duration,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub gifts_caught: u32,
    pub gifts_missed: u32,
    pub power_ups_caught: u32,
    pub power_ups_missed: u32,
    /// Points added this tick
    pub points: u64,
    pub multiplier_expired: bool,
    pub spawned_gift: bool,
    pub spawned_power_up: bool,
}

/// Caught / missed counts from one fall pass
#[derive(Debug, Clone, Copy, Default)]
struct FallOutcome {
    caught: u32,
    missed: u32,
}

/// Move every entity down and drop the ones caught or gone off the bottom
///
/// A catch wins over a miss when both apply on the same tick.
fn fall_and_collide(
    entities: &mut Vec<FallingEntity>,
    speed_multiplier: f32,
    basket: &Rect,
    view_height: f32,
) -> FallOutcome {
    let mut outcome = FallOutcome::default();
    entities.retain_mut(|entity| {
        entity.pos.y += entity.kind.fall_speed() * speed_multiplier;
        if caught_by_basket(&entity.rect(), basket) {
            outcome.caught += 1;
            false
        } else if entity.pos.y > view_height {
            outcome.missed += 1;
            false
        } else {
            true
        }
    });
    outcome
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    state.time_ticks += 1;
    state.now = input.now;

    if state.multiplier.poll(input.now) {
        report.multiplier_expired = true;
        log::debug!("Score multiplier expired at {:?}", input.now);
    }

    let basket = state.basket.rect();
    let view = state.view;

    // Gifts
    let gifts = fall_and_collide(&mut state.gifts, state.speed_multiplier, &basket, view.height);
    report.gifts_caught = gifts.caught;
    report.gifts_missed = gifts.missed;
    report.points = gifts.caught as u64 * state.multiplier.value() as u64;
    state.score += report.points;

    if let Some(gift) = maybe_spawn(EntityKind::Gift, &state.spawn_odds, view.width, &mut state.rng)
    {
        state.gifts.push(gift);
        report.spawned_gift = true;
    }

    // Power-ups
    let power_ups = fall_and_collide(
        &mut state.power_ups,
        state.speed_multiplier,
        &basket,
        view.height,
    );
    report.power_ups_caught = power_ups.caught;
    report.power_ups_missed = power_ups.missed;
    for _ in 0..power_ups.caught {
        state
            .multiplier
            .activate(state.power_up_boost, input.now, state.power_up_duration);
        log::debug!(
            "Power-up caught: x{} until {:?}",
            state.power_up_boost,
            input.now + state.power_up_duration
        );
    }

    if let Some(power_up) = maybe_spawn(
        EntityKind::PowerUp,
        &state.spawn_odds,
        view.width,
        &mut state.rng,
    ) {
        state.power_ups.push(power_up);
        report.spawned_power_up = true;
    }

    state.stats.gifts_caught += report.gifts_caught;
    state.stats.gifts_missed += report.gifts_missed;
    state.stats.power_ups_caught += report.power_ups_caught;
    state.stats.power_ups_missed += report.power_ups_missed;

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::multiplier::{ResetPolicy, ScoreMultiplier};
    use crate::sim::spawn::SpawnOdds;
    use crate::sim::state::Basket;
    use glam::Vec2;
    use proptest::prelude::*;

    /// State with spawning switched off and a 1000x1000 view
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.spawn_odds = SpawnOdds {
            gift_per_hundred: 0,
            power_up_per_thousand: 0,
        };
        state.resize(1000.0, 1000.0);
        state
    }

    fn at(now_ms: u64) -> TickInput {
        TickInput {
            now: Duration::from_millis(now_ms),
        }
    }

    fn gift_at(x: f32, y: f32) -> FallingEntity {
        FallingEntity {
            kind: EntityKind::Gift,
            pos: Vec2::new(x, y),
            size: EntityKind::Gift.size(),
        }
    }

    fn power_up_at(x: f32, y: f32) -> FallingEntity {
        FallingEntity {
            kind: EntityKind::PowerUp,
            pos: Vec2::new(x, y),
            size: EntityKind::PowerUp.size(),
        }
    }

    #[test]
    fn test_gift_caught_scores_one() {
        let mut state = quiet_state();
        state.basket = Basket {
            x: 100.0,
            y: 500.0,
            width: 200.0,
            height: 100.0,
        };
        state.gifts.push(gift_at(150.0, 590.0));

        let report = tick(&mut state, &at(0));
        assert_eq!(report.gifts_caught, 1);
        assert_eq!(state.score, 1);
        assert!(state.gifts.is_empty());
    }

    #[test]
    fn test_gift_falls_by_speed_times_multiplier() {
        let mut state = quiet_state();
        state.basket.x = 800.0;
        state.gifts.push(gift_at(0.0, 0.0));
        state.power_ups.push(power_up_at(0.0, 0.0));

        tick(&mut state, &at(0));
        assert_eq!(state.gifts[0].pos.y, 10.0);
        assert_eq!(state.power_ups[0].pos.y, 8.0);

        state.speed_multiplier = 5.0;
        tick(&mut state, &at(30));
        assert_eq!(state.gifts[0].pos.y, 60.0);
        assert_eq!(state.power_ups[0].pos.y, 48.0);
    }

    #[test]
    fn test_uncaught_gift_is_missed_not_caught() {
        let mut state = quiet_state();
        // Basket far right; gift falls down the left edge
        state.basket.x = 800.0;
        state.gifts.push(FallingEntity::above_top(EntityKind::Gift, 0.0));

        let mut caught = 0;
        let mut missed = 0;
        let mut ticks = 0;
        while !state.gifts.is_empty() {
            let report = tick(&mut state, &at(ticks * 30));
            caught += report.gifts_caught;
            missed += report.gifts_missed;
            ticks += 1;
            assert!(ticks <= 1000 / 10 + 10, "gift never left the view");
        }
        assert_eq!(caught, 0);
        assert_eq!(missed, 1);
        // -50 + 10n > 1000 first holds at n = 106
        assert_eq!(ticks, 106);
        assert_eq!(state.stats.gifts_missed, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_catch_wins_over_miss() {
        let mut state = quiet_state();
        state.basket.x = 0.0;
        // Already past the bottom edge but horizontally inside the basket
        state.gifts.push(gift_at(10.0, 995.0));
        let report = tick(&mut state, &at(0));
        assert_eq!(report.gifts_caught, 1);
        assert_eq!(report.gifts_missed, 0);
    }

    #[test]
    fn test_removal_keeps_remaining_entities() {
        let mut state = quiet_state();
        state.basket.x = 400.0; // spans 400..600, top at 850
        state.gifts = vec![
            gift_at(450.0, 800.0), // caught
            gift_at(0.0, 100.0),   // keeps falling
            gift_at(0.0, 995.0),   // missed
            gift_at(900.0, 200.0), // keeps falling
            gift_at(500.0, 790.0), // caught
        ];
        let report = tick(&mut state, &at(0));
        assert_eq!(report.gifts_caught, 2);
        assert_eq!(report.gifts_missed, 1);
        let ys: Vec<f32> = state.gifts.iter().map(|g| g.pos.y).collect();
        assert_eq!(ys, vec![110.0, 210.0]);
    }

    #[test]
    fn test_power_up_doubles_gift_score_for_five_seconds() {
        let mut state = quiet_state();
        state.basket.x = 400.0;
        state.power_ups.push(power_up_at(450.0, 800.0));
        tick(&mut state, &at(0));
        assert_eq!(state.multiplier.value(), 2);
        assert!(state.power_ups.is_empty());

        state.gifts.push(gift_at(450.0, 800.0));
        tick(&mut state, &at(4990));
        assert_eq!(state.score, 2);

        state.gifts.push(gift_at(450.0, 800.0));
        let report = tick(&mut state, &at(5000));
        assert!(report.multiplier_expired);
        assert_eq!(report.points, 1);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_gift_scores_before_same_tick_power_up() {
        let mut state = quiet_state();
        state.basket.x = 400.0;
        state.gifts.push(gift_at(450.0, 800.0));
        state.power_ups.push(power_up_at(450.0, 800.0));
        tick(&mut state, &at(0));
        assert_eq!(state.score, 1);
        assert_eq!(state.multiplier.value(), 2);
    }

    #[test]
    fn test_rearm_policy_extends_boost() {
        let mut state = quiet_state();
        state.multiplier = ScoreMultiplier::new(ResetPolicy::Rearm);
        state.basket.x = 400.0;
        state.power_ups.push(power_up_at(450.0, 800.0));
        tick(&mut state, &at(0));
        state.power_ups.push(power_up_at(450.0, 800.0));
        tick(&mut state, &at(2000));
        tick(&mut state, &at(5000));
        assert_eq!(state.multiplier.value(), 2);
        tick(&mut state, &at(7000));
        assert_eq!(state.multiplier.value(), 1);
    }

    #[test]
    fn test_new_spawn_does_not_move_on_spawn_tick() {
        let mut state = quiet_state();
        state.spawn_odds = SpawnOdds {
            gift_per_hundred: 100,
            power_up_per_thousand: 1000,
        };
        let report = tick(&mut state, &at(0));
        assert!(report.spawned_gift && report.spawned_power_up);
        assert_eq!(state.gifts[0].pos.y, -50.0);
        assert_eq!(state.power_ups[0].pos.y, -70.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.resize(720.0, 1280.0);
        b.resize(720.0, 1280.0);
        for i in 0..2000 {
            let x = (i as f32 * 7.0) % 720.0;
            a.basket.set_x_clamped(x, 720.0);
            b.basket.set_x_clamped(x, 720.0);
            tick(&mut a, &at(i * 30));
            tick(&mut b, &at(i * 30));
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.gifts, b.gifts);
        assert_eq!(a.power_ups, b.power_ups);
        assert_eq!(a.stats, b.stats);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0.0f32..1200.0, 1..400),
            speed_index in 0usize..3,
        ) {
            let mut state = GameState::new(seed);
            state.resize(1080.0, 1920.0);
            state.speed_multiplier = [1.0, 2.0, 5.0][speed_index];
            let mut last = state.score;
            for (i, x) in moves.iter().enumerate() {
                state.basket.set_x_clamped(*x, 1080.0);
                let multiplier = state.multiplier.value() as u64;
                let report = tick(&mut state, &at(i as u64 * 30));
                prop_assert!(state.score >= last);
                // Gifts score with the multiplier in effect at catch time
                let in_effect = if report.multiplier_expired { 1 } else { multiplier };
                prop_assert_eq!(report.points, report.gifts_caught as u64 * in_effect);
                last = state.score;
            }
        }
    }
}
