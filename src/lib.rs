//! Neon Dash - a one-button side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions, game state)
//! - `platform`: Frame loop lifecycle and trigger capture for the host
//! - `game`: Host-facing game instance
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// World units per point of score
    pub const SCORE_UNIT: f32 = 100.0;
    /// Hard cap on live particles regardless of settings
    pub const MAX_PARTICLES: usize = 256;
    /// Background hue advance per playing tick (degrees)
    pub const HUE_STEP: f32 = 0.1;
}

/// Color hints handed to the renderer (0xRRGGBB)
pub mod palette {
    pub const NEON_PINK: u32 = 0xFF0055;
    pub const OBSTACLE: u32 = 0xFFFFFF;
    pub const SPIKE: u32 = 0xFF0055;
}
