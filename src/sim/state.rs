//! Game state and core simulation types
//!
//! One owned struct holds everything a tick mutates. Hosts read it through
//! [`Frame`] and learn about phase changes through [`GameEvent`]s.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics;
use super::rect::Rect;
use super::world::{Obstacle, World};
use crate::consts::{MAX_PARTICLES, SCORE_UNIT};
use crate::palette;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first trigger
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, waiting for a retry trigger
    GameOver,
}

/// Transition notifications for the UI layer. Emitted only when the phase
/// changes, never per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    Started,
    /// The player hit a hazard
    Crashed { score: u64 },
}

/// The runner. `x` is fixed in screen space; only the vertical axis moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vy: f32,
    /// Visual rotation (radians). Never used for collision.
    pub angle: f32,
    pub grounded: bool,
    pub dead: bool,
}

impl Player {
    /// A player standing on the floor at its start position
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_screen_x,
            y: tuning.rest_y(),
            size: tuning.player_size,
            vy: 0.0,
            angle: 0.0,
            grounded: true,
            dead: false,
        }
    }

    /// Unrotated hitbox in world space
    #[inline]
    pub fn world_box(&self, camera_x: f32) -> Rect {
        Rect::new(camera_x + self.x, self.y, self.size, self.size)
    }

    /// Screen-space center
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// A particle for visual effects (screen space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases every tick
    pub life: f32,
    pub size: f32,
}

impl Particle {
    /// Advance one tick: drift, fall, fade
    pub fn update(&mut self, gravity: f32, decay: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life -= decay;
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance parameters this state was built with
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// World-x scroll offset
    pub camera_x: f32,
    /// Obstacles ahead of (and just behind) the camera
    pub world: World,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Score captured at the moment of the last crash
    pub crash_score: Option<u64>,
    /// Playing ticks since the run started
    pub time_ticks: u64,
    /// Cosmetic background hue in degrees
    pub background_hue: f32,
    /// Live particle budget (from settings)
    pub particle_budget: usize,
    rng: Pcg32,
}

impl GameState {
    /// Create a menu-phase state with the default balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a menu-phase state with custom balance. The tuning is
    /// validated first; generation relies on it.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::spawn(&tuning),
            tuning,
            phase: GamePhase::Menu,
            camera_x: 0.0,
            world: World::default(),
            particles: Vec::new(),
            crash_score: None,
            time_ticks: 0,
            background_hue: 0.0,
            particle_budget: MAX_PARTICLES,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Score derived from distance travelled
    #[inline]
    pub fn score(&self) -> u64 {
        (self.camera_x / SCORE_UNIT).floor() as u64
    }

    /// The single player action: start/retry outside a run, jump inside one
    pub fn trigger(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.reset();
                Some(GameEvent::Started)
            }
            GamePhase::Playing => {
                physics::apply_jump(&mut self.player, &self.tuning);
                None
            }
        }
    }

    /// Start a fresh run. The RNG stream continues, so each retry gets a new course.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.camera_x = 0.0;
        self.time_ticks = 0;
        self.crash_score = None;
        self.particles.clear();
        self.world.clear();
        let spawned = self.world.ensure_generated(
            self.camera_x,
            self.tuning.initial_spawn_x,
            &self.tuning,
            &mut self.rng,
        );
        self.phase = GamePhase::Playing;
        log::info!("Run started (seed {}, {} obstacles queued)", self.seed, spawned);
    }

    /// End the run: freeze the player and scatter particles
    pub(crate) fn crash(&mut self) -> GameEvent {
        let score = self.score();
        self.player.dead = true;
        self.spawn_death_burst();
        self.crash_score = Some(score);
        self.phase = GamePhase::GameOver;
        log::info!("Crashed at x={:.1}, score {}", self.camera_x, score);
        GameEvent::Crashed { score }
    }

    /// Burst at the player's screen position. Particles stay in screen space
    /// and do not scroll with the world.
    fn spawn_death_burst(&mut self) {
        let budget = self
            .particle_budget
            .min(MAX_PARTICLES)
            .saturating_sub(self.particles.len());
        let count = self.tuning.particle_count.min(budget);
        let origin = self.player.center();

        for _ in 0..count {
            let angle: f32 = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = self.rng.random_range(2.0..7.0);
            let size: f32 = self.rng.random_range(2.0..6.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                color: palette::NEON_PINK,
                life: 1.0,
                size,
            });
        }
    }

    /// Advance and expire particles
    pub(crate) fn update_particles(&mut self) {
        let (gravity, decay) = (self.tuning.particle_gravity, self.tuning.particle_decay);
        for particle in self.particles.iter_mut() {
            particle.update(gravity, decay);
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Split borrow for the generator
    pub(crate) fn world_and_rng(&mut self) -> (&mut World, &mut Pcg32, &Tuning) {
        (&mut self.world, &mut self.rng, &self.tuning)
    }

    /// Read-only view for the renderer
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            player: &self.player,
            camera_x: self.camera_x,
            obstacles: self.world.obstacles(),
            particles: &self.particles,
            score: self.score(),
            crash_score: self.crash_score,
            background_hue: self.background_hue,
        }
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub camera_x: f32,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u64,
    pub crash_score: Option<u64>,
    pub background_hue: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.world.obstacles().is_empty());
        assert_eq!(state.score(), 0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_invalid_tuning_is_refused() {
        let tuning = Tuning {
            gap_min: 300.0,
            gap_max: 300.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, tuning),
            Err(TuningError::Invalid { field: "gap_max", .. })
        ));

        let tuning = Tuning {
            scroll_speed: 8.0,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(1, tuning).unwrap();
        assert_eq!(state.tuning.scroll_speed, 8.0);
        assert_eq!(state.seed, 1);
    }

    #[test]
    fn test_trigger_from_menu_starts_run() {
        let mut state = GameState::new(7);
        assert_eq!(state.trigger(), Some(GameEvent::Started));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.world.obstacles().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.camera_x, 0.0);
        // First batch starts after the initial spawn point plus the minimum gap
        assert!(state.world.obstacles()[0].rect.x >= 500.0 + 250.0);
    }

    #[test]
    fn test_trigger_while_playing_jumps() {
        let mut state = GameState::new(7);
        state.trigger();
        assert_eq!(state.trigger(), None);
        assert_eq!(state.player.vy, state.tuning.jump_force);
        assert!(!state.player.grounded);

        // Airborne trigger changes nothing
        state.player.vy = 3.0;
        assert_eq!(state.trigger(), None);
        assert_eq!(state.player.vy, 3.0);
    }

    #[test]
    fn test_score_floors_camera() {
        let mut state = GameState::new(1);
        state.camera_x = 99.9;
        assert_eq!(state.score(), 0);
        state.camera_x = 100.0;
        assert_eq!(state.score(), 1);
        state.camera_x = 1234.5;
        assert_eq!(state.score(), 12);
    }

    #[test]
    fn test_crash_spawns_burst_in_screen_space() {
        let mut state = GameState::new(3);
        state.trigger();
        state.camera_x = 5000.0;
        let event = state.crash();

        assert_eq!(event, GameEvent::Crashed { score: 50 });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.dead);
        assert_eq!(state.crash_score, Some(50));
        assert_eq!(state.particles.len(), state.tuning.particle_count);
        let center = state.player.center();
        for p in &state.particles {
            assert_eq!(p.pos, center);
            assert_eq!(p.life, 1.0);
            assert!((2.0..6.0).contains(&p.size));
            let speed = p.vel.length();
            assert!(speed >= 1.99 && speed < 7.01, "speed {speed}");
        }
    }

    #[test]
    fn test_particle_budget_caps_burst() {
        let mut state = GameState::new(3);
        state.particle_budget = 10;
        state.trigger();
        state.crash();
        assert_eq!(state.particles.len(), 10);

        let mut state = GameState::new(3);
        state.particle_budget = 0;
        state.trigger();
        state.crash();
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = GameState::new(3);
        state.trigger();
        state.crash();
        let before = state.particles[0].clone();
        state.update_particles();
        let after = &state.particles[0];
        assert_eq!(after.pos, before.pos + before.vel);
        assert!((after.vel.y - (before.vel.y + 0.2)).abs() < 1e-5);
        assert!((after.life - 0.98).abs() < 1e-5);

        // 1.0 / 0.02 = 50 ticks, plus slack for float drift
        for _ in 0..60 {
            state.update_particles();
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_retry_resets_run() {
        let mut state = GameState::new(11);
        state.trigger();
        state.camera_x = 2500.0;
        state.player.angle = 1.0;
        state.crash();

        assert_eq!(state.trigger(), Some(GameEvent::Started));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.crash_score, None);
        assert!(state.particles.is_empty());
        assert_eq!(state.player, Player::spawn(&state.tuning));
        assert!(state.world.obstacles()[0].rect.x >= 750.0);
    }

    #[test]
    fn test_frame_serializes() {
        let mut state = GameState::new(5);
        state.trigger();
        let json = serde_json::to_string(&state.frame()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"obstacles\""));
    }
}
