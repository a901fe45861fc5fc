//! Freefall - a pseudo-3D freefall dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, motion, collisions)
//! - `render`: Perspective projection and canvas-2D drawing
//! - `highscore`: Best-distance record persisted to LocalStorage

pub mod highscore;
pub mod render;
pub mod sim;

pub use highscore::BestDistance;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Altitude at the start of a run; the fall counts down from here
    pub const START_ALTITUDE: f32 = 10_000.0;
    /// Fall speed at the start of a run (world units per tick)
    pub const INITIAL_SPEED: f32 = 6.0;
    /// Fall speed cap
    pub const MAX_SPEED: f32 = 15.0;
    /// Speed gains one unit per this much distance fallen
    pub const SPEED_STEP_DISTANCE: f32 = 1_000.0;

    /// Player half-size (square avatar)
    pub const PLAYER_HALF: f32 = 12.0;
    /// Lateral steering speed (world units per tick per held key)
    pub const STEER_SPEED: f32 = 7.0;
    /// Vertical steering is a fraction of lateral for a leaning feel
    pub const VERTICAL_STEER_FACTOR: f32 = 0.6;
    /// Symmetric steering bounds around the fall axis
    pub const LATERAL_BOUND: f32 = 320.0;
    pub const VERTICAL_BOUND: f32 = 220.0;

    /// Half-depth of the z band in which an obstacle can touch the player
    pub const PLANE_HALF_DEPTH: f32 = 20.0;
    /// Depth of the first obstacle ahead of the player at session start
    pub const FIRST_OBSTACLE_Z: f32 = 600.0;
    /// Depth spacing between consecutive obstacle indices
    pub const OBSTACLE_SPACING: f32 = 240.0;
    /// Obstacles this far behind the player are evicted
    pub const EVICT_BEHIND: f32 = 150.0;
    /// Generator keeps the spawn frontier at least this far ahead
    pub const SPAWN_HORIZON: f32 = 6_000.0;

    /// Wind random-walk step per tick and hard bound
    pub const WIND_STEP: f32 = 0.06;
    pub const WIND_MAX: f32 = 2.5;

    /// Perspective divisor: scale = FOV / (FOV + depth)
    pub const FOV: f32 = 320.0;
}

/// Pack 8-bit RGB channels into a 0xRRGGBB word
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack a 0xRRGGBB word into 8-bit channels
#[inline]
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
