//! Procedural obstacle course
//!
//! Obstacles are laid out left to right in small batches ("patterns"). The
//! four-way pattern roll below is the whole difficulty model: thresholds and
//! sizes are fixed so every run has the same feel.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::palette;
use crate::tuning::Tuning;

/// Second spike of a double, relative to the first
pub const DOUBLE_SPIKE_OFFSET: f32 = 30.0;
/// Spike riding on a block, relative to the block
pub const TOPPER_OFFSET: f32 = 10.0;
/// Side length of the spike riding on a block
pub const TOPPER_SIZE: f32 = 30.0;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Deadly on contact (with a forgiving hitbox)
    Spike,
    /// Solid: land on top, crash into the side
    Block,
}

/// An obstacle in world space. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Color hint for the renderer (0xRRGGBB)
    pub color: u32,
}

/// Obstacle arrangements the generator can place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    SingleSpike,
    DoubleSpike,
    Block,
    SpikedBlock,
}

impl Pattern {
    /// Map a roll in [0, 1) onto a pattern: 40% / 20% / 20% / 20%
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.4 {
            Pattern::SingleSpike
        } else if roll < 0.6 {
            Pattern::DoubleSpike
        } else if roll < 0.8 {
            Pattern::Block
        } else {
            Pattern::SpikedBlock
        }
    }
}

/// The obstacle list plus the id counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Ordered by spawn (and therefore batch x)
    obstacles: Vec<Obstacle>,
    next_id: u64,
}

impl World {
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Append a single obstacle, returning its id
    pub fn spawn(&mut self, kind: ObstacleKind, rect: Rect) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let color = match kind {
            ObstacleKind::Spike => palette::SPIKE,
            ObstacleKind::Block => palette::OBSTACLE,
        };
        self.obstacles.push(Obstacle {
            id,
            kind,
            rect,
            color,
        });
        id
    }

    /// Make sure obstacles exist past the right edge of the view.
    ///
    /// `start_x` seeds the cursor when the world is empty. Returns the number
    /// of obstacles appended (zero when the course already reaches far enough).
    pub fn ensure_generated<R: Rng>(
        &mut self,
        camera_x: f32,
        start_x: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        let threshold = camera_x + tuning.viewport_width + tuning.spawn_lead;
        let mut cursor = match self.obstacles.last() {
            Some(last) => last.rect.right() + tuning.trailing_margin,
            None => start_x,
        };

        if cursor >= threshold {
            return 0;
        }

        let before = self.obstacles.len();
        // Fill roughly one extra screen beyond the threshold
        let horizon = threshold + tuning.viewport_width;
        while cursor < horizon {
            let gap: f32 = rng.random_range(tuning.gap_min..tuning.gap_max);
            cursor += gap;
            let pattern = Pattern::from_roll(rng.random::<f32>());
            self.spawn_pattern(pattern, cursor, tuning);
        }

        let spawned = self.obstacles.len() - before;
        log::debug!(
            "Generated {} obstacles up to x={:.0} (camera {:.0})",
            spawned,
            cursor,
            camera_x
        );
        spawned
    }

    /// Place one pattern with its left edge at `x`
    pub fn spawn_pattern(&mut self, pattern: Pattern, x: f32, tuning: &Tuning) {
        let size = tuning.block_size;
        let ground = tuning.floor_y - size;
        match pattern {
            Pattern::SingleSpike => {
                self.spawn(ObstacleKind::Spike, Rect::new(x, ground, size, size));
            }
            Pattern::DoubleSpike => {
                self.spawn(ObstacleKind::Spike, Rect::new(x, ground, size, size));
                self.spawn(
                    ObstacleKind::Spike,
                    Rect::new(x + DOUBLE_SPIKE_OFFSET, ground, size, size),
                );
            }
            Pattern::Block => {
                self.spawn(ObstacleKind::Block, Rect::new(x, ground, size, size));
            }
            Pattern::SpikedBlock => {
                self.spawn(ObstacleKind::Block, Rect::new(x, ground, size, size));
                self.spawn(
                    ObstacleKind::Spike,
                    Rect::new(
                        x + TOPPER_OFFSET,
                        tuning.floor_y - size * 2.0,
                        TOPPER_SIZE,
                        TOPPER_SIZE,
                    ),
                );
            }
        }
    }

    /// Drop obstacles whose right edge is more than `margin` behind the camera
    pub fn cull(&mut self, camera_x: f32, margin: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.rect.right() > camera_x - margin);
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::debug!("Culled {} obstacles behind x={:.0}", culled, camera_x);
        }
        culled
    }

    /// Obstacles that could touch a player box whose left edge is `player_x`
    pub fn near(&self, player_x: f32, ahead: f32, behind: f32) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(move |o| o.rect.x <= player_x + ahead && o.rect.right() >= player_x - behind)
    }
}
