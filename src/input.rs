//! Pointer input mapping
//!
//! Down and move events drag the sleigh so it is centred under the pointer;
//! up events leave it where it is.

use serde::{Deserialize, Serialize};

use crate::sim::Basket;

/// Phase of a pointer (touch or mouse) event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer event in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            phase: PointerPhase::Down,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            phase: PointerPhase::Move,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            phase: PointerPhase::Up,
        }
    }
}

/// Move the basket for a pointer event; returns true if it moved
pub fn apply_pointer(basket: &mut Basket, view_width: f32, event: &PointerEvent) -> bool {
    match event.phase {
        PointerPhase::Down | PointerPhase::Move => {
            if !event.x.is_finite() {
                log::warn!("Ignoring pointer event with x = {}", event.x);
                return false;
            }
            basket.set_x_clamped(event.x - basket.width / 2.0, view_width);
            true
        }
        PointerPhase::Up => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_centres_basket_under_pointer() {
        let mut basket = Basket::default();
        assert!(apply_pointer(&mut basket, 1080.0, &PointerEvent::down(500.0, 10.0)));
        assert_eq!(basket.x, 400.0);
        apply_pointer(&mut basket, 1080.0, &PointerEvent::moved(600.0, 10.0));
        assert_eq!(basket.x, 500.0);
    }

    #[test]
    fn test_clamps_at_edges() {
        let mut basket = Basket::default();
        apply_pointer(&mut basket, 1080.0, &PointerEvent::moved(20.0, 0.0));
        assert_eq!(basket.x, 0.0);
        apply_pointer(&mut basket, 1080.0, &PointerEvent::moved(1070.0, 0.0));
        assert_eq!(basket.x, 880.0);
    }

    #[test]
    fn test_up_is_noop() {
        let mut basket = Basket::default();
        basket.x = 300.0;
        assert!(!apply_pointer(&mut basket, 1080.0, &PointerEvent::up(10.0, 0.0)));
        assert_eq!(basket.x, 300.0);
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut basket = Basket::default();
        basket.x = 300.0;
        assert!(!apply_pointer(&mut basket, 1080.0, &PointerEvent::moved(f32::NAN, 0.0)));
        assert!(!apply_pointer(
            &mut basket,
            1080.0,
            &PointerEvent::down(f32::INFINITY, 0.0)
        ));
        assert_eq!(basket.x, 300.0);
    }

    #[test]
    fn test_view_narrower_than_basket() {
        let mut basket = Basket::default();
        apply_pointer(&mut basket, 150.0, &PointerEvent::moved(140.0, 0.0));
        assert_eq!(basket.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_basket_stays_in_view(
            view_width in 0.0f32..4000.0,
            xs in proptest::collection::vec(-5000.0f32..10000.0, 1..50),
        ) {
            let mut basket = Basket::default();
            for x in xs {
                apply_pointer(&mut basket, view_width, &PointerEvent::moved(x, 0.0));
                prop_assert!(basket.x >= 0.0);
                prop_assert!(basket.x <= (view_width - basket.width).max(0.0));
            }
        }
    }
}
