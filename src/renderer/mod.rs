//! Rendering module
//!
//! The scene builder is platform independent; the canvas painter only
//! exists in browser builds.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCmd, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
