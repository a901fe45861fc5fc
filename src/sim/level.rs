//! Obstacle field generation
//!
//! Obstacles are placed at increasing depth, one index at a time. The index
//! selects a difficulty band: simple single boxes first, then paired boxes
//! with a gap, then cycling multi-box layouts, then rings, then oscillating
//! boxes, and finally a mix that includes full maze slices. All randomness
//! comes from the state-owned seeded RNG, so a given seed always produces
//! the same level.

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{GameState, MotionAxis, MotionPattern, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::pack_rgb;

/// Difficulty band boundaries (obstacle index)
const SINGLE_BAND_END: u32 = 12;
const PAIRED_BAND_END: u32 = 30;
const LAYOUT_BAND_END: u32 = 46;
const RING_BAND_END: u32 = 70;
const MOVING_BAND_END: u32 = 100;
/// In the mixed band, every n-th index becomes a maze slice
const MAZE_EVERY: u32 = 8;

/// Maze slice grid dimensions (odd so a single center cell exists)
const MAZE_COLS: i32 = 5;
const MAZE_ROWS: i32 = 3;
/// Probability that a maze cell becomes a wall
const MAZE_WALL_CHANCE: f64 = 0.35;

/// Minimum half-width of any gap the player is expected to fit through
const GAP_HALF: f32 = 60.0;

/// Top up the obstacle field until the spawn frontier passes `horizon`.
///
/// Called at session start and again whenever the fall consumes enough of
/// the generated extent, so the level never runs out.
pub fn extend(state: &mut GameState, horizon: f32) {
    let before = state.next_obstacle_index;
    while state.frontier_z < horizon {
        let index = state.next_obstacle_index;
        let z = state.frontier_z;
        place_index(state, index, z);
        state.next_obstacle_index += 1;
        state.frontier_z += OBSTACLE_SPACING;
    }
    let placed = state.next_obstacle_index - before;
    if placed > 0 {
        log::debug!(
            "Level extended by {} indices (frontier now {:.0})",
            placed,
            state.frontier_z
        );
    }
}

/// Place the obstacle(s) for one difficulty index at the given depth
pub(crate) fn place_index(state: &mut GameState, index: u32, z: f32) {
    match index {
        i if i < SINGLE_BAND_END => place_single(state, z),
        i if i < PAIRED_BAND_END => place_paired(state, z),
        i if i < LAYOUT_BAND_END => place_layout(state, i, z),
        i if i < RING_BAND_END => place_ring(state, z),
        i if i < MOVING_BAND_END => place_moving(state, i, z),
        i if i.is_multiple_of(MAZE_EVERY) => place_maze(state, z),
        i => match i % 3 {
            0 => place_ring(state, z),
            1 => place_moving(state, i, z),
            _ => place_layout(state, i, z),
        },
    }
}

fn push_box(state: &mut GameState, kind: ObstacleKind, pos: Vec3, half: Vec2, color: u32) {
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos,
        half,
        color,
    });
}

/// One box at a random lateral offset, easy to sidestep
fn place_single(state: &mut GameState, z: f32) {
    let hw = state.rng.random_range(60.0..110.0);
    let hh = state.rng.random_range(30.0..60.0);
    let x = state.rng.random_range(-LATERAL_BOUND * 0.7..LATERAL_BOUND * 0.7);
    let y = state.rng.random_range(-VERTICAL_BOUND * 0.5..VERTICAL_BOUND * 0.5);
    push_box(
        state,
        ObstacleKind::Solid,
        Vec3::new(x, y, z),
        Vec2::new(hw, hh),
        pack_rgb(230, 110, 60),
    );
}

/// Two boxes leaving one gap at a random lateral position
fn place_paired(state: &mut GameState, z: f32) {
    let gap_center = state.rng.random_range(-LATERAL_BOUND * 0.6..LATERAL_BOUND * 0.6);
    let hh = state.rng.random_range(50.0..90.0);
    let y = state.rng.random_range(-VERTICAL_BOUND * 0.3..VERTICAL_BOUND * 0.3);

    let left_edge = gap_center - GAP_HALF;
    let right_edge = gap_center + GAP_HALF;
    let left_hw = (left_edge + LATERAL_BOUND) / 2.0;
    let right_hw = (LATERAL_BOUND - right_edge) / 2.0;

    if left_hw > 1.0 {
        push_box(
            state,
            ObstacleKind::Solid,
            Vec3::new(-LATERAL_BOUND + left_hw, y, z),
            Vec2::new(left_hw, hh),
            pack_rgb(70, 190, 180),
        );
    }
    if right_hw > 1.0 {
        push_box(
            state,
            ObstacleKind::Solid,
            Vec3::new(LATERAL_BOUND - right_hw, y, z),
            Vec2::new(right_hw, hh),
            pack_rgb(70, 190, 180),
        );
    }
}

/// Cycling multi-box layouts: three-with-a-gap, three walls, offset-random
fn place_layout(state: &mut GameState, index: u32, z: f32) {
    match index % 3 {
        0 => place_three_gap(state, z),
        1 => place_three_wall(state, z),
        _ => place_offset_random(state, z),
    }
}

/// Four lateral slots, one left open, boxes in the other three
fn place_three_gap(state: &mut GameState, z: f32) {
    let slots = 4;
    let slot_w = LATERAL_BOUND * 2.0 / slots as f32;
    let open = state.rng.random_range(0..slots);
    let hh = state.rng.random_range(60.0..100.0);
    for slot in 0..slots {
        if slot == open {
            continue;
        }
        let x = -LATERAL_BOUND + slot_w * (slot as f32 + 0.5);
        push_box(
            state,
            ObstacleKind::Solid,
            Vec3::new(x, 0.0, z),
            Vec2::new(slot_w * 0.45, hh),
            pack_rgb(150, 110, 220),
        );
    }
}

/// Three stacked full-width bars with a shared gap column to thread
fn place_three_wall(state: &mut GameState, z: f32) {
    let gap_x = state.rng.random_range(-LATERAL_BOUND * 0.6..LATERAL_BOUND * 0.6);
    let bar_hh = 30.0;
    let rows = [-VERTICAL_BOUND * 0.6, 0.0, VERTICAL_BOUND * 0.6];
    for y in rows {
        let left_edge = gap_x - GAP_HALF;
        let right_edge = gap_x + GAP_HALF;
        let left_hw = (left_edge + LATERAL_BOUND) / 2.0;
        let right_hw = (LATERAL_BOUND - right_edge) / 2.0;
        if left_hw > 1.0 {
            push_box(
                state,
                ObstacleKind::Solid,
                Vec3::new(-LATERAL_BOUND + left_hw, y, z),
                Vec2::new(left_hw, bar_hh),
                pack_rgb(150, 110, 220),
            );
        }
        if right_hw > 1.0 {
            push_box(
                state,
                ObstacleKind::Solid,
                Vec3::new(LATERAL_BOUND - right_hw, y, z),
                Vec2::new(right_hw, bar_hh),
                pack_rgb(150, 110, 220),
            );
        }
    }
}

/// A larger box offset randomly on both axes
fn place_offset_random(state: &mut GameState, z: f32) {
    let hw = state.rng.random_range(90.0..150.0);
    let hh = state.rng.random_range(60.0..110.0);
    let x = state.rng.random_range(-LATERAL_BOUND * 0.6..LATERAL_BOUND * 0.6);
    let y = state.rng.random_range(-VERTICAL_BOUND * 0.6..VERTICAL_BOUND * 0.6);
    push_box(
        state,
        ObstacleKind::Solid,
        Vec3::new(x, y, z),
        Vec2::new(hw, hh),
        pack_rgb(150, 110, 220),
    );
}

/// An annulus the player must thread through its open center
fn place_ring(state: &mut GameState, z: f32) {
    let outer_radius = state.rng.random_range(120.0..180.0);
    let thickness = state.rng.random_range(26.0..36.0);
    let x_span = (LATERAL_BOUND - outer_radius).max(1.0);
    let y_span = (VERTICAL_BOUND - outer_radius * 0.5).max(1.0);
    let x = state.rng.random_range(-x_span..x_span);
    let y = state.rng.random_range(-y_span..y_span);
    push_box(
        state,
        ObstacleKind::Ring {
            outer_radius,
            thickness,
        },
        Vec3::new(x, y, z),
        Vec2::splat(outer_radius),
        pack_rgb(240, 200, 80),
    );
}

/// A box oscillating around its anchor; axis cycles with the index
fn place_moving(state: &mut GameState, index: u32, z: f32) {
    let axis = match index % 3 {
        0 => MotionAxis::Horizontal,
        1 => MotionAxis::Vertical,
        _ => MotionAxis::Circular,
    };
    let anchor = Vec2::new(
        state.rng.random_range(-LATERAL_BOUND * 0.5..LATERAL_BOUND * 0.5),
        state.rng.random_range(-VERTICAL_BOUND * 0.4..VERTICAL_BOUND * 0.4),
    );
    let pattern = MotionPattern {
        axis,
        amplitude: state.rng.random_range(60.0..120.0),
        angular_speed: state.rng.random_range(0.02..0.05),
        phase: state.rng.random_range(0.0..TAU),
        anchor,
    };
    push_box(
        state,
        ObstacleKind::Moving { pattern },
        Vec3::new(anchor.x, anchor.y, z),
        Vec2::new(70.0, 45.0),
        pack_rgb(230, 70, 90),
    );
}

/// A full maze slice: each grid cell independently becomes a wall, except
/// the center cell, which always stays open so a path exists.
fn place_maze(state: &mut GameState, z: f32) {
    let cell_w = LATERAL_BOUND * 2.0 / MAZE_COLS as f32;
    let cell_h = VERTICAL_BOUND * 2.0 / MAZE_ROWS as f32;
    for row in 0..MAZE_ROWS {
        for col in 0..MAZE_COLS {
            if col == MAZE_COLS / 2 && row == MAZE_ROWS / 2 {
                continue;
            }
            if !state.rng.random_bool(MAZE_WALL_CHANCE) {
                continue;
            }
            let x = -LATERAL_BOUND + cell_w * (col as f32 + 0.5);
            let y = -VERTICAL_BOUND + cell_h * (row as f32 + 0.5);
            push_box(
                state,
                ObstacleKind::Maze,
                Vec3::new(x, y, z),
                Vec2::new(cell_w / 2.0, cell_h / 2.0),
                pack_rgb(110, 130, 200),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_level_spawns_ahead_of_player() {
        let state = GameState::new(42);
        assert!(!state.obstacles.is_empty());
        for obstacle in &state.obstacles {
            assert!(
                obstacle.pos.z > 0.0,
                "obstacle {} spawned at z={}",
                obstacle.id,
                obstacle.pos.z
            );
        }
    }

    #[test]
    fn test_generation_order_is_non_decreasing_depth() {
        let state = GameState::new(42);
        let mut last_z = 0.0;
        for obstacle in &state.obstacles {
            assert!(obstacle.pos.z >= last_z - f32::EPSILON);
            last_z = last_z.max(obstacle.pos.z);
        }
    }

    #[test]
    fn test_extend_advances_frontier_past_horizon() {
        let mut state = GameState::new(9);
        let target = state.frontier_z + 5_000.0;
        extend(&mut state, target);
        assert!(state.frontier_z >= target);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_different_seed_different_level() {
        let a = GameState::new(1);
        let b = GameState::new(2);
        assert_ne!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_early_band_is_single_solid_boxes() {
        let mut state = GameState::new(5);
        state.obstacles.clear();
        place_index(&mut state, 0, 600.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::Solid);
    }

    #[test]
    fn test_ring_band_places_rings() {
        let mut state = GameState::new(5);
        state.obstacles.clear();
        place_index(&mut state, RING_BAND_END - 1, 600.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(
            state.obstacles[0].kind,
            ObstacleKind::Ring { .. }
        ));
    }

    #[test]
    fn test_moving_band_carries_motion_patterns() {
        let mut state = GameState::new(5);
        state.obstacles.clear();
        place_index(&mut state, MOVING_BAND_END - 1, 600.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(
            state.obstacles[0].kind,
            ObstacleKind::Moving { .. }
        ));
    }

    #[test]
    fn test_maze_center_cell_always_open() {
        // Many seeds: the maze must never wall off the center cell
        for seed in 0..50u64 {
            let mut state = GameState::new(seed);
            state.obstacles.clear();
            place_maze(&mut state, 600.0);
            for obstacle in &state.obstacles {
                let contains_center = (obstacle.pos.x).abs() < obstacle.half.x
                    && (obstacle.pos.y).abs() < obstacle.half.y;
                assert!(
                    !contains_center,
                    "seed {} walled the maze center at ({}, {})",
                    seed, obstacle.pos.x, obstacle.pos.y
                );
            }
        }
    }

    #[test]
    fn test_paired_band_leaves_a_gap() {
        let mut state = GameState::new(77);
        state.obstacles.clear();
        place_index(&mut state, SINGLE_BAND_END, 600.0);
        // The two boxes must not jointly cover the full lateral span
        let covered: f32 = state.obstacles.iter().map(|o| o.half.x * 2.0).sum();
        assert!(covered < LATERAL_BOUND * 2.0 - GAP_HALF);
    }
}
