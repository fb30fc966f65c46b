//! wgpu render backend for the ocean.
//!
//! Draws the tiled water window and a box hull for the vehicle. Waves are
//! either taken from the host-evaluated patch buffers or evaluated in the
//! vertex shader from a single time uniform.
//!
//! # Invariants
//! - Renderer never mutates simulation state.
//! - Patch topology is uploaded once; per frame only origins, uniforms and
//!   (on the host wave path) heights and normals are written.

mod gpu;
mod scene;
mod shaders;
mod surface;

pub use gpu::OceanRenderer;
pub use scene::{HostSample, OceanDrawList, OceanScene};
pub use shaders::{VEHICLE_SHADER, water_shader};
pub use surface::surface_color;
