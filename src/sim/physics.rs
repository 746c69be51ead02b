//! Vertical physics for the runner
//!
//! Horizontal motion is the camera's job; the player only ever moves on y.
//! All functions advance exactly one tick.

use std::f32::consts::FRAC_PI_2;

use super::state::Player;
use crate::tuning::Tuning;

/// Gravity plus the terminal velocity clamp.
///
/// The clamp keeps a falling player from skipping through the landing
/// window of a block in a single tick.
#[inline]
pub fn apply_gravity(player: &mut Player, tuning: &Tuning) {
    player.vy = (player.vy + tuning.gravity).min(tuning.terminal_velocity);
}

/// Snap to the floor if the player reached it. Returns whether it did.
pub fn resolve_floor(player: &mut Player, tuning: &Tuning) -> bool {
    if player.y + player.size >= tuning.floor_y {
        player.y = tuning.floor_y - player.size;
        player.vy = 0.0;
        player.grounded = true;
        true
    } else {
        player.grounded = false;
        false
    }
}

/// One tick of vertical motion: gravity, move, floor contact
pub fn integrate(player: &mut Player, tuning: &Tuning) {
    apply_gravity(player, tuning);
    player.y += player.vy;
    resolve_floor(player, tuning);
}

/// Jump if standing on something. Returns whether the jump happened.
pub fn apply_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.grounded && !player.dead {
        player.vy = tuning.jump_force;
        player.grounded = false;
        true
    } else {
        false
    }
}

/// Rest the player on top of a surface at `top`
#[inline]
pub fn land_on(player: &mut Player, top: f32) {
    player.y = top - player.size;
    player.vy = 0.0;
    player.grounded = true;
}

/// Spin while airborne, ease back to a flat face while grounded
pub fn update_rotation(player: &mut Player, tuning: &Tuning) {
    if player.grounded {
        let target = (player.angle / FRAC_PI_2).round() * FRAC_PI_2;
        player.angle += (target - player.angle) * tuning.snap_smoothing;
    } else {
        player.angle += tuning.spin_per_tick;
    }
}
