//! Data-driven game balance
//!
//! Every number that shapes the feel of a run lives here. `Default` is the
//! shipped balance; a JSON file may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::world::DOUBLE_SPIKE_OFFSET;

/// Errors produced while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance parameters. Distances are world units, rates are per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,

    // === Physics ===
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_force: f32,
    /// Camera advance per tick
    pub scroll_speed: f32,
    /// Maximum downward velocity
    pub terminal_velocity: f32,

    // === Player ===
    pub player_size: f32,
    /// Fixed screen-space x of the player's left edge
    pub player_screen_x: f32,
    /// y of the floor surface (screen and world share the vertical axis)
    pub floor_y: f32,

    // === World generation ===
    pub block_size: f32,
    /// Gap between consecutive patterns is drawn from [gap_min, gap_max)
    pub gap_min: f32,
    pub gap_max: f32,
    /// Distance kept after the last obstacle before a new batch starts
    pub trailing_margin: f32,
    /// Generation kicks in once the cursor is within this distance past the viewport
    pub spawn_lead: f32,
    /// Where the first obstacle batch of a run is measured from
    pub initial_spawn_x: f32,
    /// Obstacles this far behind the camera are dropped
    pub cull_margin: f32,

    // === Collision ===
    /// Inset applied to both boxes before a spike test
    pub spike_padding: f32,
    /// How deep feet may sink into a block top and still count as a landing
    pub landing_tolerance: f32,
    /// Obstacles starting further than this ahead of the player are skipped
    pub collision_ahead: f32,
    /// Obstacles ending further than this behind the player are skipped
    pub collision_behind: f32,

    // === Cosmetics ===
    /// Airborne spin (radians per tick)
    pub spin_per_tick: f32,
    /// Grounded easing factor toward the nearest right angle
    pub snap_smoothing: f32,
    pub particle_count: usize,
    pub particle_gravity: f32,
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 1200.0,

            gravity: 0.6,
            jump_force: -11.5,
            scroll_speed: 6.5,
            terminal_velocity: 15.0,

            player_size: 40.0,
            player_screen_x: 150.0,
            floor_y: 380.0,

            block_size: 50.0,
            gap_min: 250.0,
            gap_max: 550.0,
            trailing_margin: 200.0,
            spawn_lead: 100.0,
            initial_spawn_x: 500.0,
            cull_margin: 100.0,

            spike_padding: 10.0,
            landing_tolerance: 20.0,
            collision_ahead: 200.0,
            collision_behind: 100.0,

            spin_per_tick: 0.15,
            snap_smoothing: 0.2,
            particle_count: 30,
            particle_gravity: 0.2,
            particle_decay: 0.02,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning file and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall generation or break collision
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let finite = [
            ("viewport_width", self.viewport_width),
            ("block_size", self.block_size),
            ("gap_min", self.gap_min),
            ("gap_max", self.gap_max),
            ("trailing_margin", self.trailing_margin),
            ("spawn_lead", self.spawn_lead),
            ("initial_spawn_x", self.initial_spawn_x),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(*field, "must be finite");
        }

        if !(self.block_size > 0.0) {
            return invalid("block_size", "must be strictly positive");
        }
        // Each gap must clear the widest pattern so the cursor always moves
        // past the batch it just placed
        if !(self.gap_min > DOUBLE_SPIKE_OFFSET + self.block_size) {
            return invalid("gap_min", "must exceed the widest pattern (block_size + 30)");
        }
        if !(self.gap_max > self.gap_min) {
            return invalid("gap_max", "must be greater than gap_min");
        }
        if !(self.trailing_margin >= 0.0) {
            return invalid("trailing_margin", "must not be negative");
        }
        if !(self.viewport_width > 0.0) {
            return invalid("viewport_width", "must be strictly positive");
        }
        if !(self.player_size > 0.0) {
            return invalid("player_size", "must be strictly positive");
        }
        if !(self.terminal_velocity > 0.0) {
            return invalid("terminal_velocity", "must be strictly positive");
        }
        // A fall faster than the landing window would tunnel into blocks
        if !(self.terminal_velocity <= self.landing_tolerance) {
            return invalid("terminal_velocity", "must not exceed landing_tolerance");
        }
        if !(self.scroll_speed >= 0.0) {
            return invalid("scroll_speed", "must not be negative");
        }
        if !(self.jump_force < 0.0) {
            return invalid("jump_force", "must point upward (negative)");
        }
        if !(self.particle_decay > 0.0) {
            return invalid("particle_decay", "must be strictly positive");
        }
        Ok(())
    }

    /// Top edge of a player standing on the floor
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.floor_y - self.player_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 8.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 8.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.gap_min, 250.0);
    }

    #[test]
    fn test_zero_gap_rejected() {
        let err = Tuning::from_json(r#"{ "gap_min": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_min", .. }));
    }

    #[test]
    fn test_tiny_gap_rejected() {
        let err = Tuning::from_json(r#"{ "gap_min": 1e-6, "gap_max": 2e-6 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_min", .. }));

        // Narrower than a double spike
        let err = Tuning::from_json(r#"{ "gap_min": 80.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_min", .. }));
        assert!(Tuning::from_json(r#"{ "gap_min": 81.0 }"#).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let tuning = Tuning {
            viewport_width: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "viewport_width", .. })
        ));

        let tuning = Tuning {
            gap_max: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "gap_max", .. })
        ));

        let tuning = Tuning {
            gap_min: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "gap_min", .. })
        ));
    }

    #[test]
    fn test_negative_trailing_margin_rejected() {
        let err = Tuning::from_json(r#"{ "trailing_margin": -400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "trailing_margin", .. }));
        assert!(Tuning::from_json(r#"{ "trailing_margin": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_terminal_velocity_within_landing_window() {
        let err = Tuning::from_json(r#"{ "terminal_velocity": 40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "terminal_velocity", .. }));
        assert!(Tuning::from_json(r#"{ "terminal_velocity": 20.0 }"#).is_ok());
    }

    #[test]
    fn test_empty_gap_range_rejected() {
        let err = Tuning::from_json(r#"{ "gap_min": 300.0, "gap_max": 300.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_max", .. }));
    }

    #[test]
    fn test_downward_jump_rejected() {
        let err = Tuning::from_json(r#"{ "jump_force": 4.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "jump_force", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rest_y() {
        assert_eq!(Tuning::default().rest_y(), 340.0);
    }
}
