//! Host-facing game instance
//!
//! Glues the simulation to a host: input handlers press the trigger slot,
//! the frame loop calls [`Game::frame`], the renderer reads
//! [`Game::snapshot`].

use crate::platform::TriggerSlot;
use crate::settings::Settings;
use crate::sim::{Frame, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    trigger: TriggerSlot,
    autopilot: bool,
}

impl Game {
    /// Build a game in the menu phase. Fails if the tuning does not validate.
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Result<Self, TuningError> {
        let mut state = GameState::with_tuning(seed, tuning)?;
        state.particle_budget = settings.max_particles();
        log::info!(
            "Game initialized with seed {} (quality {}, demo {})",
            seed,
            settings.quality.as_str(),
            settings.demo_mode
        );
        Ok(Self {
            state,
            trigger: TriggerSlot::new(),
            autopilot: settings.demo_mode,
        })
    }

    /// Handle for input handlers. Presses land at the next frame boundary.
    pub fn trigger_handle(&self) -> TriggerSlot {
        self.trigger.clone()
    }

    /// The single player action: start, jump or retry
    pub fn trigger(&self) {
        self.trigger.press();
    }

    /// Run one frame's worth of simulation
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            trigger: self.trigger.take(),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Frame<'_> {
        self.state.frame()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
