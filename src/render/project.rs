//! Perspective projection
//!
//! Maps simulation space (x/y steering plane, z depth) to screen space with
//! a single perspective divide. Pure math so the mapping is testable without
//! a canvas.

use glam::{Vec2, Vec3};

use crate::consts::{FOV, INITIAL_SPEED};
use crate::sim::Obstacle;

/// A world point mapped to the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Perspective scale; also sizes shapes and modulates their alpha
    pub scale: f32,
}

/// Project a world point. Returns `None` for points at or behind the camera
/// (non-positive scale), which must not be drawn.
pub fn project(world: Vec3, shake: Vec2, center: Vec2) -> Option<Projected> {
    let denom = FOV + world.z;
    if denom <= 0.0 {
        return None;
    }
    let scale = FOV / denom;
    // World y points up, screen y points down
    let plane = Vec2::new(world.x, -world.y) + shake;
    Some(Projected {
        screen: center + plane * scale,
        scale,
    })
}

/// Cosmetic camera shake: jitter grows with speed above the base rate, and
/// the view leans against the player's steering offset.
pub fn camera_shake(speed: f32, player_pos: Vec2, time_ticks: u64) -> Vec2 {
    let t = time_ticks as f32;
    let amplitude = (speed - INITIAL_SPEED).max(0.0) * 0.35;
    let jitter = Vec2::new((t * 0.9).sin(), (t * 1.3).cos()) * amplitude;
    jitter - Vec2::new(player_pos.x, -player_pos.y) * 0.05
}

/// Indices of the obstacles sorted back-to-front (descending depth), so
/// nearer shapes paint over farther ones without a depth buffer.
pub fn depth_order(obstacles: &[Obstacle]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..obstacles.len()).collect();
    order.sort_by(|&a, &b| {
        obstacles[b]
            .pos
            .z
            .partial_cmp(&obstacles[a].pos.z)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Alpha for a shape at the given perspective scale; distant shapes fade out
pub fn depth_alpha(scale: f32) -> f32 {
    scale.clamp(0.08, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;

    #[test]
    fn test_scale_is_unity_at_player_plane() {
        let p = project(Vec3::new(100.0, 50.0, 0.0), Vec2::ZERO, Vec2::ZERO).unwrap();
        assert!((p.scale - 1.0).abs() < 1e-6);
        assert!((p.screen.x - 100.0).abs() < 1e-4);
        assert!((p.screen.y - (-50.0)).abs() < 1e-4);
    }

    #[test]
    fn test_deeper_points_shrink_toward_center() {
        let center = Vec2::new(480.0, 270.0);
        let near = project(Vec3::new(200.0, 0.0, 100.0), Vec2::ZERO, center).unwrap();
        let far = project(Vec3::new(200.0, 0.0, 2_000.0), Vec2::ZERO, center).unwrap();
        assert!(far.scale < near.scale);
        assert!((far.screen.x - center.x).abs() < (near.screen.x - center.x).abs());
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        assert!(project(Vec3::new(0.0, 0.0, -FOV), Vec2::ZERO, Vec2::ZERO).is_none());
        assert!(project(Vec3::new(0.0, 0.0, -FOV - 50.0), Vec2::ZERO, Vec2::ZERO).is_none());
        // Just in front of the camera still projects (very large scale)
        assert!(project(Vec3::new(0.0, 0.0, -FOV + 1.0), Vec2::ZERO, Vec2::ZERO).is_some());
    }

    #[test]
    fn test_depth_order_is_back_to_front() {
        let make = |id: u32, z: f32| Obstacle {
            id,
            kind: ObstacleKind::Solid,
            pos: Vec3::new(0.0, 0.0, z),
            half: Vec2::new(10.0, 10.0),
            color: 0,
        };
        let obstacles = vec![make(1, 100.0), make(2, 900.0), make(3, 400.0)];
        let order = depth_order(&obstacles);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_depth_alpha_clamps() {
        assert_eq!(depth_alpha(2.0), 1.0);
        assert_eq!(depth_alpha(0.5), 0.5);
        assert_eq!(depth_alpha(0.01), 0.08);
    }
}
