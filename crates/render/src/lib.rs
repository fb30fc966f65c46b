//! Rendering adapter: camera tracking and a renderer-agnostic frame interface.
//!
//! # Invariants
//! - Renderers never mutate simulation state.
//! - The camera pose is recomputed from the vehicle every tick; nothing about
//!   it is carried between ticks.

mod camera;
mod renderer;

pub use camera::{CameraPose, CameraRig, Projection};
pub use renderer::{DebugTextRenderer, FrameView, Renderer};

pub fn crate_info() -> &'static str {
    "oceanspace-render v0.1.0"
}
