//! Error types
//!
//! Sprite acquisition is the only failure the game itself can hit; it is
//! fatal for the view. The rest covers settings loading and the loop thread.

use thiserror::Error;

use crate::assets::SpriteKind;

/// Failure to obtain a sprite from a [`crate::SpriteProvider`]
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to acquire {kind} sprite at {width}x{height}: {reason}")]
    Unavailable {
        kind: SpriteKind,
        width: u32,
        height: u32,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("simulation loop panicked; round state lost")]
    LoopPanicked,
}
