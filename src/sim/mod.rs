//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Contact, classify};
pub use rect::Rect;
pub use state::{Frame, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
pub use world::{Obstacle, ObstacleKind, Pattern, World};
