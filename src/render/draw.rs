//! Canvas-2D renderer (browser only)
//!
//! Draws the obstacle field back-to-front with simple filled shapes; nearer
//! shapes occlude farther ones without a depth buffer, and alpha fades with
//! the perspective scale. HUD text lives in the DOM, not here; the only text
//! this module draws is the debug overlay.

use glam::{Vec2, Vec3};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::project::{camera_shake, depth_alpha, depth_order, project};
use crate::consts::*;
use crate::sim::{GamePhase, GameState, ObstacleKind};
use crate::unpack_rgb;

/// CSS color string for a packed RGB word at the given alpha
fn css_rgba(color: u32, alpha: f32) -> String {
    let (r, g, b) = unpack_rgb(color);
    format!("rgba({r},{g},{b},{alpha:.3})")
}

pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            context,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Render one frame of the current state
    pub fn render(&self, state: &GameState, debug: bool) {
        let ctx = &self.context;

        ctx.set_fill_style_str("#0b0e1a");
        ctx.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let shake = if state.phase == GamePhase::Falling {
            camera_shake(state.speed(), state.player.pos, state.time_ticks)
        } else {
            Vec2::ZERO
        };
        let center = self.center();

        // Back-to-front so near shapes paint over far ones
        let order = depth_order(&state.obstacles);
        for idx in order {
            let obstacle = &state.obstacles[idx];
            let Some(p) = project(obstacle.pos, shake, center) else {
                continue;
            };
            let alpha = depth_alpha(p.scale);

            match obstacle.kind {
                ObstacleKind::Ring {
                    outer_radius,
                    thickness,
                } => {
                    let mid_radius = (outer_radius - thickness / 2.0) * p.scale;
                    ctx.set_stroke_style_str(&css_rgba(obstacle.color, alpha));
                    ctx.set_line_width((thickness * p.scale) as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        p.screen.x as f64,
                        p.screen.y as f64,
                        mid_radius.max(0.5) as f64,
                        0.0,
                        TAU,
                    );
                    ctx.stroke();
                }
                ObstacleKind::Solid | ObstacleKind::Maze | ObstacleKind::Moving { .. } => {
                    let half = obstacle.half * p.scale;
                    ctx.set_fill_style_str(&css_rgba(obstacle.color, alpha));
                    ctx.fill_rect(
                        (p.screen.x - half.x) as f64,
                        (p.screen.y - half.y) as f64,
                        (half.x * 2.0) as f64,
                        (half.y * 2.0) as f64,
                    );
                }
            }
        }

        self.draw_player(state, shake, center);

        if debug {
            self.draw_debug_overlay(state, shake, center);
        }
    }

    fn draw_player(&self, state: &GameState, shake: Vec2, center: Vec2) {
        let ctx = &self.context;
        let world = Vec3::new(state.player.pos.x, state.player.pos.y, 0.0);
        let Some(p) = project(world, shake, center) else {
            return;
        };
        let half = (PLAYER_HALF * p.scale) as f64;

        ctx.set_fill_style_str("#e8f0ff");
        ctx.fill_rect(
            p.screen.x as f64 - half,
            p.screen.y as f64 - half,
            half * 2.0,
            half * 2.0,
        );
        ctx.set_stroke_style_str("rgba(120,180,255,0.9)");
        ctx.set_line_width(2.0);
        ctx.stroke_rect(
            p.screen.x as f64 - half - 2.0,
            p.screen.y as f64 - half - 2.0,
            half * 2.0 + 4.0,
            half * 2.0 + 4.0,
        );
    }

    /// F-key overlay: steering bounds, collision zones at the player's
    /// plane, and internal state readout
    fn draw_debug_overlay(&self, state: &GameState, shake: Vec2, center: Vec2) {
        let ctx = &self.context;
        let speed = state.speed();

        // Steering bounds at the player's plane
        if let Some(p) = project(
            Vec3::new(-LATERAL_BOUND, VERTICAL_BOUND, 0.0),
            shake,
            center,
        ) {
            ctx.set_stroke_style_str("rgba(90,220,120,0.5)");
            ctx.set_line_width(1.0);
            ctx.stroke_rect(
                p.screen.x as f64,
                p.screen.y as f64,
                (LATERAL_BOUND * 2.0 * p.scale) as f64,
                (VERTICAL_BOUND * 2.0 * p.scale) as f64,
            );
        }

        // Collision zones: outline everything close enough to hit
        ctx.set_stroke_style_str("rgba(255,60,60,0.9)");
        ctx.set_line_width(2.0);
        for obstacle in state.obstacles.iter().filter(|o| o.at_player_plane(speed)) {
            let Some(p) = project(obstacle.pos, shake, center) else {
                continue;
            };
            match obstacle.kind {
                ObstacleKind::Ring {
                    outer_radius,
                    thickness,
                } => {
                    for radius in [outer_radius, outer_radius - thickness] {
                        ctx.begin_path();
                        let _ = ctx.arc(
                            p.screen.x as f64,
                            p.screen.y as f64,
                            (radius * p.scale).max(0.5) as f64,
                            0.0,
                            TAU,
                        );
                        ctx.stroke();
                    }
                }
                _ => {
                    let half = obstacle.half * p.scale;
                    ctx.stroke_rect(
                        (p.screen.x - half.x) as f64,
                        (p.screen.y - half.y) as f64,
                        (half.x * 2.0) as f64,
                        (half.y * 2.0) as f64,
                    );
                }
            }
        }

        ctx.set_fill_style_str("rgba(150,255,170,0.9)");
        ctx.set_font("12px monospace");
        let lines = [
            format!("tick {}", state.time_ticks),
            format!("speed {:.0}", speed),
            format!("wind {:+.2}", state.wind),
            format!("obstacles {}", state.obstacles.len()),
            format!(
                "player {:+.0},{:+.0}",
                state.player.pos.x, state.player.pos.y
            ),
        ];
        for (i, line) in lines.iter().enumerate() {
            let _ = ctx.fill_text(line, 10.0, 20.0 + i as f64 * 16.0);
        }
    }
}
