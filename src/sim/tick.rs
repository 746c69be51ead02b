//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one display frame.

use super::autopilot;
use super::collision::{self, Contact};
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::HUE_STEP;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start, retry or jump (click/tap/space)
    pub trigger: bool,
    /// Idle/demo mode - autopilot jumps for the player
    pub autopilot: bool,
}

/// Advance the game state by one tick, returning any phase transitions
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.trigger {
        events.extend(state.trigger());
    } else if input.autopilot && autopilot::wants_jump(state) {
        state.trigger();
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.background_hue = (state.background_hue + HUE_STEP) % 360.0;

    // Scroll
    state.camera_x += state.tuning.scroll_speed;

    // Gravity and floor
    physics::integrate(&mut state.player, &state.tuning);

    // World upkeep
    let camera_x = state.camera_x;
    let (world, rng, tuning) = state.world_and_rng();
    world.cull(camera_x, tuning.cull_margin);
    world.ensure_generated(camera_x, camera_x + tuning.viewport_width, tuning, rng);

    if hits_hazard(state) {
        events.push(state.crash());
        // The burst gets its first step on the crash tick, then freezes
        state.update_particles();
        return events;
    }

    physics::update_rotation(&mut state.player, &state.tuning);
    state.update_particles();

    events
}

/// Test the player against nearby obstacles, applying landings in order.
/// Returns true on the first fatal contact.
fn hits_hazard(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    let player_x = state.camera_x + state.player.x;

    for obstacle in state
        .world
        .near(player_x, tuning.collision_ahead, tuning.collision_behind)
    {
        // Rebuilt each time: a landing moves the player
        let player_box = state.player.world_box(state.camera_x);
        match collision::classify(&player_box, state.player.vy, obstacle, tuning) {
            Contact::Death => return true,
            Contact::Land => physics::land_on(&mut state.player, obstacle.rect.y),
            Contact::None => {}
        }
    }
    false
}
