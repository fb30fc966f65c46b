//! Ocean streaming: a fixed window of surface patches recycled around the
//! vehicle, and the wave field that animates them.
//!
//! # Invariants
//! - The window is allocated once; patches are moved, never created or dropped.
//! - Patches always sit on the lattice of spacing `tile_size`, without gaps or
//!   overlaps, and every patch origin stays within `tile_range · tile_size +
//!   tile_size / 2` of the vehicle on each axis.
//! - Heights are evaluated in patch-local coordinates, so moving a patch never
//!   changes its wave shape; normals are refreshed with every height update.

mod grid;
mod tiler;
mod wave;

pub use grid::{CellCoord, Lattice, cells_in_radius};
pub use tiler::{OceanTiler, PatchLayout, SurfacePatch, TilerConfig, TilerStats};
pub use wave::{WaveField, WavePath};

pub fn crate_info() -> &'static str {
    "oceanspace-stream v0.1.0"
}
