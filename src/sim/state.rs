//! Game state and core simulation types
//!
//! Everything the per-tick update mutates lives here. The state is fully
//! deterministic: all randomness flows through the seeded RNG it owns.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Intro panel shown, waiting for the start input
    Intro,
    /// Active fall
    Falling,
    /// Run ended by a collision
    GameOver,
}

/// Oscillation axis for moving obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAxis {
    Horizontal,
    Vertical,
    Circular,
}

/// Sinusoidal drift applied to a moving obstacle around its anchor point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPattern {
    pub axis: MotionAxis,
    /// Peak displacement from the anchor (world units)
    pub amplitude: f32,
    /// Radians advanced per simulation tick
    pub angular_speed: f32,
    /// Phase offset sampled at creation time
    pub phase: f32,
    /// Rest position the oscillation is centered on
    pub anchor: Vec2,
}

impl MotionPattern {
    /// Displacement from the anchor at the given tick
    pub fn offset_at(&self, tick: u64) -> Vec2 {
        let t = tick as f32 * self.angular_speed + self.phase;
        match self.axis {
            MotionAxis::Horizontal => Vec2::new(t.sin() * self.amplitude, 0.0),
            MotionAxis::Vertical => Vec2::new(0.0, t.sin() * self.amplitude),
            MotionAxis::Circular => Vec2::new(t.cos(), t.sin()) * self.amplitude,
        }
    }
}

/// Obstacle shape variants
///
/// Motion data exists only on the `Moving` variant; a stationary box can
/// never oscillate by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    /// Axis-aligned box
    Solid,
    /// Annulus that must be flown through its open center
    Ring { outer_radius: f32, thickness: f32 },
    /// Wall cell of a maze slice
    Maze,
    /// Box oscillating around an anchor
    Moving { pattern: MotionPattern },
}

/// A single collidable obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// x/y in the steering plane, z = depth ahead of the player's plane
    pub pos: Vec3,
    /// Box half-extents (unused by `Ring`, which derives extent from radius)
    pub half: Vec2,
    /// Packed 0xRRGGBB draw color
    pub color: u32,
}

impl Obstacle {
    /// Re-derive the oscillating position from the frame counter.
    /// No-op for stationary kinds.
    pub fn apply_motion(&mut self, tick: u64) {
        if let ObstacleKind::Moving { pattern } = self.kind {
            let offset = pattern.offset_at(tick);
            self.pos.x = pattern.anchor.x + offset.x;
            self.pos.y = pattern.anchor.y + offset.y;
        }
    }

    /// Whether this obstacle is close enough in depth to touch the player.
    /// Widened by the current speed so a fast fall cannot tunnel through.
    pub fn at_player_plane(&self, speed: f32) -> bool {
        self.pos.z.abs() <= PLANE_HALF_DEPTH + speed * 0.5
    }
}

/// The player's avatar: an offset from the fall axis plus a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Player {
    /// x lateral, y vertical, both clamped to the steering bounds
    pub pos: Vec2,
}

impl Player {
    pub fn half_size(&self) -> f32 {
        PLAYER_HALF
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; restarting with the same seed replays the same level
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter, drives moving-obstacle phase
    pub time_ticks: u64,
    /// Cumulative distance fallen (the score metric)
    pub fallen: f32,
    pub player: Player,
    /// Lateral wind force, evolved by a bounded random walk
    pub wind: f32,
    /// Active obstacles, non-decreasing in z at generation time
    pub obstacles: Vec<Obstacle>,
    /// Difficulty index of the next obstacle the generator will place
    pub next_obstacle_index: u32,
    /// Depth at which the next obstacle will spawn
    pub frontier_z: f32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session and generate the initial obstacle field
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            time_ticks: 0,
            fallen: 0.0,
            player: Player::default(),
            wind: 0.0,
            obstacles: Vec::new(),
            next_obstacle_index: 0,
            frontier_z: FIRST_OBSTACLE_Z,
            next_id: 1,
        };

        super::level::extend(&mut state, SPAWN_HORIZON);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current fall speed: steps up once per [`SPEED_STEP_DISTANCE`] fallen,
    /// saturating at [`MAX_SPEED`]
    pub fn speed(&self) -> f32 {
        (INITIAL_SPEED + (self.fallen / SPEED_STEP_DISTANCE).floor()).min(MAX_SPEED)
    }

    /// Remaining altitude readout (may go negative on very long runs)
    pub fn altitude(&self) -> f32 {
        START_ALTITUDE - self.fallen
    }

    /// Rebuild the session from its seed: player, speed, distance, and the
    /// entire obstacle field return to their session-start values.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }
}
