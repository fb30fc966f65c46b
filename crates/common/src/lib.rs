//! Shared types and math helpers for the oceanspace core.
//!
//! # Invariants
//! - Angles handed across crate boundaries are wrapped to (−π, π].

pub mod angle;
mod error;
pub mod types;

pub use angle::{shortest_arc, wrap_angle};
pub use error::ConfigError;
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "oceanspace-common v0.1.0"
}
