//! Per-frame simulation tick
//!
//! One tick runs a fixed order: player steering, wind, world
//! advance, eviction, replenishment, collision. Outside the `Falling` phase
//! the tick only watches for the start/restart input, so a finished run is
//! frozen until the player restarts.

use rand::Rng;

use super::collision::check_collision;
use super::level;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Held-key state sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// A held
    pub left: bool,
    /// D held
    pub right: bool,
    /// W held
    pub up: bool,
    /// S held
    pub down: bool,
    /// Space pressed this frame: start from the intro, or restart after a
    /// game over (one-shot)
    pub start: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Intro => {
            if input.start {
                state.phase = GamePhase::Falling;
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.start {
                state.reset();
                state.phase = GamePhase::Falling;
                log::info!("Run restarted (seed {})", state.seed);
            }
            return;
        }
        GamePhase::Falling => {}
    }

    state.time_ticks += 1;

    steer(state, input);

    // Wind: bounded random walk, pushes the player laterally every tick
    let gust = state.rng.random_range(-WIND_STEP..=WIND_STEP);
    state.wind = (state.wind + gust).clamp(-WIND_MAX, WIND_MAX);
    state.player.pos.x = (state.player.pos.x + state.wind).clamp(-LATERAL_BOUND, LATERAL_BOUND);

    // World advance: obstacles stream toward the player's plane
    let speed = state.speed();
    state.fallen += speed;
    state.frontier_z -= speed;
    let time_ticks = state.time_ticks;
    for obstacle in &mut state.obstacles {
        obstacle.pos.z -= speed;
        obstacle.apply_motion(time_ticks);
    }

    // Evict obstacles well behind the player; generation order means the
    // survivors stay sorted by depth
    state.obstacles.retain(|o| o.pos.z > -EVICT_BEHIND);

    // Keep the fall unbounded
    level::extend(state, SPAWN_HORIZON);

    if let Some(id) = check_collision(state) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Hit obstacle {} after {:.0} units fallen",
            id,
            state.fallen
        );
    }
}

/// Apply held-key steering: fixed per-axis speed, no inertia, clamped to the
/// symmetric bounds around the fall axis
fn steer(state: &mut GameState, input: &TickInput) {
    let mut delta_x = 0.0;
    let mut delta_y = 0.0;
    if input.left {
        delta_x -= STEER_SPEED;
    }
    if input.right {
        delta_x += STEER_SPEED;
    }
    if input.up {
        delta_y += STEER_SPEED * VERTICAL_STEER_FACTOR;
    }
    if input.down {
        delta_y -= STEER_SPEED * VERTICAL_STEER_FACTOR;
    }

    let pos = &mut state.player.pos;
    pos.x = (pos.x + delta_x).clamp(-LATERAL_BOUND, LATERAL_BOUND);
    pos.y = (pos.y + delta_y).clamp(-VERTICAL_BOUND, VERTICAL_BOUND);
}
