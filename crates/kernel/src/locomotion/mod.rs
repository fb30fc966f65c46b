//! Locomotion models: turn an `InputState` into vehicle motion.
//!
//! Two strategies share the `LocomotionModel` capability:
//! - [`HeadingThrust`]: thrust along the heading, steer with left/right, brake
//!   with back. Velocity is damped when no thrust is applied and capped at a
//!   maximum speed.
//! - [`ScreenThrust`]: each held direction pushes the velocity along a fixed
//!   screen axis; friction decays the velocity every tick.

mod heading;
mod screen;

use std::fmt;
use std::str::FromStr;

use oceanspace_common::ConfigError;
use oceanspace_input::InputState;
use serde::{Deserialize, Serialize};

pub use heading::{HeadingThrust, HeadingThrustConfig};
pub use screen::{ScreenThrust, ScreenThrustConfig};

use crate::vehicle::Vehicle2D;

/// Speeds below this are snapped to rest so decay terminates in finite precision.
pub(crate) const REST_SPEED: f32 = 1e-5;

/// A strategy that advances a vehicle by one tick.
pub trait LocomotionModel: fmt::Debug {
    fn kind(&self) -> LocomotionKind;

    /// Advance `vehicle` by one tick of `dt` seconds given the held actions.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    fn advance(&mut self, vehicle: &mut Vehicle2D, input: &InputState, dt: f32);
}

/// Which locomotion strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocomotionKind {
    HeadingThrust,
    ScreenThrust,
}

impl LocomotionKind {
    pub fn name(self) -> &'static str {
        match self {
            LocomotionKind::HeadingThrust => "heading_thrust",
            LocomotionKind::ScreenThrust => "screen_thrust",
        }
    }
}

impl fmt::Display for LocomotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocomotionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "heading_thrust" | "heading" | "a" => Ok(LocomotionKind::HeadingThrust),
            "screen_thrust" | "screen" | "b" => Ok(LocomotionKind::ScreenThrust),
            other => Err(format!("unknown locomotion model: {other}")),
        }
    }
}

/// Tunables for the selected locomotion model, tagged by `model`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum LocomotionConfig {
    HeadingThrust(HeadingThrustConfig),
    ScreenThrust(ScreenThrustConfig),
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig::HeadingThrust(HeadingThrustConfig::default())
    }
}

impl LocomotionConfig {
    /// Default tunables for `kind`.
    pub fn for_kind(kind: LocomotionKind) -> Self {
        match kind {
            LocomotionKind::HeadingThrust => {
                LocomotionConfig::HeadingThrust(HeadingThrustConfig::default())
            }
            LocomotionKind::ScreenThrust => {
                LocomotionConfig::ScreenThrust(ScreenThrustConfig::default())
            }
        }
    }

    pub fn kind(&self) -> LocomotionKind {
        match self {
            LocomotionConfig::HeadingThrust(_) => LocomotionKind::HeadingThrust,
            LocomotionConfig::ScreenThrust(_) => LocomotionKind::ScreenThrust,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            LocomotionConfig::HeadingThrust(c) => c.validate(),
            LocomotionConfig::ScreenThrust(c) => c.validate(),
        }
    }

    /// Instantiate the configured model.
    pub fn build(&self) -> Box<dyn LocomotionModel> {
        tracing::debug!(model = %self.kind(), "building locomotion model");
        match *self {
            LocomotionConfig::HeadingThrust(c) => Box::new(HeadingThrust::new(c)),
            LocomotionConfig::ScreenThrust(c) => Box::new(ScreenThrust::new(c)),
        }
    }
}

pub(crate) fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}
