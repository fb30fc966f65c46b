//! Session orchestration: configuration, the startup gate and the tick loop.
//!
//! # Invariants
//! - A [`Simulation`] exists only after the vehicle visual has loaded.
//! - Each tick runs input, locomotion, facing, camera, recentering and waves
//!   in that order, on one thread.
//! - Stopping a session means not calling [`Simulation::tick`] again.

mod clock;
mod config;
mod error;
mod simulation;
mod source;
mod timer;

pub use clock::{Clock, FixedClock, FrameTime, MAX_FRAME_DELTA, WallClock};
pub use config::SimConfig;
pub use error::{ConfigFileError, StartupError};
pub use simulation::{SessionSummary, Simulation, TickReport, launch, run_session};
pub use source::InputSource;
pub use timer::FrameTimer;

pub fn crate_info() -> &'static str {
    "oceanspace-session v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("session"));
    }
}
