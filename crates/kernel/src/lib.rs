//! Vehicle kernel: authoritative vehicle state and locomotion integration.
//!
//! # Invariants
//! - `Vehicle2D` is mutated only by a `LocomotionModel`.
//! - Velocity stays bounded for every input sequence and every `dt` in [0, 1].
//! - Cosmetic sway never feeds back into position or velocity.

mod facing;
pub mod locomotion;
mod sway;
mod vehicle;

pub use facing::{HeadingConfig, HeadingSmoother, ease_heading};
pub use locomotion::{
    HeadingThrust, HeadingThrustConfig, LocomotionConfig, LocomotionKind, LocomotionModel,
    ScreenThrust, ScreenThrustConfig,
};
pub use sway::{SwayConfig, SwayPose};
pub use vehicle::Vehicle2D;

pub fn crate_info() -> &'static str {
    "oceanspace-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
