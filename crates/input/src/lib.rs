//! Input: named directional actions and the per-tick input snapshot.
//!
//! # Invariants
//! - The core only reads `InputState`; the windowing layer is the only writer.
//! - Unrecognised action or key names are ignored, never an error.

pub mod action;
mod bindings;
mod state;

pub use action::Action;
pub use bindings::KeyBindings;
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "oceanspace-input v0.1.0"
}
