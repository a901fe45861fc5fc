//! Projection math and canvas drawing

pub mod project;

#[cfg(target_arch = "wasm32")]
pub mod draw;

pub use project::{Projected, camera_shake, depth_alpha, depth_order, project};

#[cfg(target_arch = "wasm32")]
pub use draw::CanvasRenderer;
