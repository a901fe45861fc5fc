//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{boxes_overlap, check_collision, player_hits, ring_hit};
pub use level::extend;
pub use state::{GamePhase, GameState, MotionAxis, MotionPattern, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
