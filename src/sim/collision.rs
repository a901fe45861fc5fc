//! Collision detection
//!
//! Runs once per tick against the obstacles inside the narrow depth band at
//! the player's plane. Two primitive tests cover every obstacle kind: strict
//! axis-aligned box overlap, and a radial annulus test for rings. The first
//! hit short-circuits the scan; one hit ends the run.

use glam::Vec2;

use super::state::{GameState, Obstacle, ObstacleKind};

/// Strict interval-overlap test between two axis-aligned boxes given by
/// min corner and size. Touching edges do not collide.
#[inline]
pub fn boxes_overlap(a_min: Vec2, a_size: Vec2, b_min: Vec2, b_size: Vec2) -> bool {
    a_min.x < b_min.x + b_size.x
        && a_min.x + a_size.x > b_min.x
        && a_min.y < b_min.y + b_size.y
        && a_min.y + a_size.y > b_min.y
}

/// Radial annulus test: a point at distance `dist` from the ring center hits
/// the wall iff it lies strictly inside the band `(outer - thickness, outer)`.
/// Passing through the open center or staying fully outside is safe.
#[inline]
pub fn ring_hit(dist: f32, outer_radius: f32, thickness: f32) -> bool {
    dist > outer_radius - thickness && dist < outer_radius
}

/// Test the player against a single obstacle in the steering plane
pub fn player_hits(player_pos: Vec2, player_half: f32, obstacle: &Obstacle) -> bool {
    match obstacle.kind {
        ObstacleKind::Ring {
            outer_radius,
            thickness,
        } => {
            let center = Vec2::new(obstacle.pos.x, obstacle.pos.y);
            ring_hit(player_pos.distance(center), outer_radius, thickness)
        }
        ObstacleKind::Solid | ObstacleKind::Maze | ObstacleKind::Moving { .. } => {
            let half = Vec2::splat(player_half);
            boxes_overlap(
                player_pos - half,
                half * 2.0,
                Vec2::new(obstacle.pos.x, obstacle.pos.y) - obstacle.half,
                obstacle.half * 2.0,
            )
        }
    }
}

/// Scan the obstacles at the player's plane; returns the id of the first hit
pub fn check_collision(state: &GameState) -> Option<u32> {
    let speed = state.speed();
    state
        .obstacles
        .iter()
        .filter(|o| o.at_player_plane(speed))
        .find(|o| player_hits(state.player.pos, state.player.half_size(), o))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn ring(x: f32, y: f32, z: f32, outer: f32, thickness: f32) -> Obstacle {
        Obstacle {
            id: 1,
            kind: ObstacleKind::Ring {
                outer_radius: outer,
                thickness,
            },
            pos: Vec3::new(x, y, z),
            half: Vec2::splat(outer),
            color: 0,
        }
    }

    fn solid(x: f32, y: f32, z: f32, hw: f32, hh: f32) -> Obstacle {
        Obstacle {
            id: 2,
            kind: ObstacleKind::Solid,
            pos: Vec3::new(x, y, z),
            half: Vec2::new(hw, hh),
            color: 0,
        }
    }

    #[test]
    fn test_ring_boundary() {
        let outer = 150.0;
        let thickness = 30.0;

        // Mid-wall hit
        assert!(ring_hit(outer - thickness / 2.0, outer, thickness));
        // Exact center is safe
        assert!(!ring_hit(0.0, outer, thickness));
        // Fully outside is safe
        assert!(!ring_hit(outer + 1.0, outer, thickness));
        // Edges are strict
        assert!(!ring_hit(outer, outer, thickness));
        assert!(!ring_hit(outer - thickness, outer, thickness));
    }

    #[test]
    fn test_box_overlap_strict_edges() {
        let size = Vec2::new(10.0, 10.0);
        let a = Vec2::ZERO;

        // Exactly touching on x: no collision
        assert!(!boxes_overlap(a, size, Vec2::new(10.0, 0.0), size));
        // Exactly touching on y: no collision
        assert!(!boxes_overlap(a, size, Vec2::new(0.0, 10.0), size));
        // Slight overlap on both axes: collision
        assert!(boxes_overlap(a, size, Vec2::new(9.9, 9.9), size));
        // Overlap on one axis only: no collision
        assert!(!boxes_overlap(a, size, Vec2::new(5.0, 20.0), size));
    }

    #[test]
    fn test_player_through_ring_center() {
        let obstacle = ring(50.0, -20.0, 0.0, 150.0, 30.0);
        // Dead center of the ring
        assert!(!player_hits(Vec2::new(50.0, -20.0), 12.0, &obstacle));
        // On the wall band
        assert!(player_hits(Vec2::new(50.0 + 135.0, -20.0), 12.0, &obstacle));
    }

    #[test]
    fn test_scan_only_inside_player_plane_band() {
        let mut state = GameState::new(3);
        state.obstacles.clear();
        // Directly on the player but far ahead in depth
        state.obstacles.push(solid(0.0, 0.0, 500.0, 50.0, 50.0));
        assert_eq!(check_collision(&state), None);

        // Same obstacle at the player's plane
        state.obstacles[0].pos.z = 0.0;
        assert_eq!(check_collision(&state), Some(2));
    }

    #[test]
    fn test_scan_short_circuits_on_first_hit() {
        let mut state = GameState::new(3);
        state.obstacles.clear();
        let mut first = solid(0.0, 0.0, 0.0, 50.0, 50.0);
        first.id = 10;
        let mut second = solid(0.0, 0.0, 0.0, 50.0, 50.0);
        second.id = 11;
        state.obstacles.push(first);
        state.obstacles.push(second);
        assert_eq!(check_collision(&state), Some(10));
    }

    proptest! {
        #[test]
        fn prop_box_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a_min = Vec2::new(ax, ay);
            let b_min = Vec2::new(bx, by);
            let a_size = Vec2::new(aw, ah);
            let b_size = Vec2::new(bw, bh);
            prop_assert_eq!(
                boxes_overlap(a_min, a_size, b_min, b_size),
                boxes_overlap(b_min, b_size, a_min, a_size)
            );
        }

        #[test]
        fn prop_separated_boxes_never_overlap(
            gap in 0.0f32..100.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            // Place b strictly to the right of a with `gap` between them
            let a_min = Vec2::ZERO;
            let b_min = Vec2::new(aw + gap, 0.0);
            prop_assert!(!boxes_overlap(
                a_min,
                Vec2::new(aw, ah),
                b_min,
                Vec2::new(bw, bh)
            ));
        }

        #[test]
        fn prop_ring_safe_outside_band(
            outer in 50.0f32..300.0,
            thickness in 5.0f32..40.0,
            dist in 0.0f32..500.0,
        ) {
            let inside_band = dist > outer - thickness && dist < outer;
            prop_assert_eq!(ring_hit(dist, outer, thickness), inside_band);
        }
    }
}
