//! Player-vs-obstacle classification
//!
//! Two boxes and the sign of the player's vertical velocity are enough to
//! tell "landed on a block" from "ran into a block": a shallow overlap at the
//! top while falling is a landing, anything else is a crash. Spikes get a
//! padded hitbox so grazing a corner is survivable.

use super::rect::Rect;
use super::world::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Outcome of testing the player against one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Death,
    /// Player is arriving on top of a block
    Land,
}

/// Classify the player's (unrotated) box against an obstacle
pub fn classify(player: &Rect, player_vy: f32, obstacle: &Obstacle, tuning: &Tuning) -> Contact {
    // Broad phase
    if !player.overlaps(&obstacle.rect) {
        return Contact::None;
    }

    match obstacle.kind {
        ObstacleKind::Spike => {
            let pad = tuning.spike_padding;
            if player.inset(pad).overlaps(&obstacle.rect.inset(pad)) {
                Contact::Death
            } else {
                Contact::None
            }
        }
        ObstacleKind::Block => {
            let feet_depth = player.bottom() - obstacle.rect.y;
            let falling = player_vy >= 0.0;
            if falling && feet_depth > 0.0 && feet_depth <= tuning.landing_tolerance {
                Contact::Land
            } else {
                Contact::Death
            }
        }
    }
}
