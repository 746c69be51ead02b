//! Demo mode: the game plays itself
//!
//! Jumps as soon as an obstacle's left edge comes within reach. With the
//! default balance a jump from that distance clears every pattern.

use super::state::{GamePhase, GameState};

/// Distance between the player's front edge and an obstacle at which to jump
pub const JUMP_LEAD: f32 = 40.0;

/// Whether the demo pilot would jump this tick
pub fn wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    if state.phase != GamePhase::Playing || !player.grounded || player.dead {
        return false;
    }

    let front = player.world_box(state.camera_x).right();
    state
        .world
        .obstacles()
        .iter()
        .map(|o| o.rect.x - front)
        .any(|distance| distance > 0.0 && distance <= JUMP_LEAD)
}
