use glam::Vec2;
use oceanspace_common::ConfigError;
use oceanspace_input::{Action, InputState};
use serde::{Deserialize, Serialize};

use super::{LocomotionKind, LocomotionModel, REST_SPEED, sanitize_dt};
use crate::vehicle::Vehicle2D;

/// Tunables for [`HeadingThrust`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingThrustConfig {
    /// Velocity added per tick while thrusting, along the heading.
    pub acceleration: f32,
    /// Speed cap applied after every tick.
    pub max_speed: f32,
    /// Per-tick velocity multiplier when not thrusting, in (0, 1).
    pub damping: f32,
    /// Steering rate in radians per second.
    pub turn_rate: f32,
}

impl Default for HeadingThrustConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            max_speed: 5.0,
            damping: 0.96,
            turn_rate: 1.5,
        }
    }
}

impl HeadingThrustConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check("acceleration", self.acceleration, |v| v >= 0.0, ">= 0")?;
        ConfigError::check("max_speed", self.max_speed, |v| v > 0.0, "> 0")?;
        ConfigError::check("damping", self.damping, |v| v > 0.0 && v < 1.0, "(0, 1)")?;
        ConfigError::check("turn_rate", self.turn_rate, |v| v >= 0.0, ">= 0")?;
        Ok(())
    }
}

/// Heading-relative thrust.
///
/// Per tick:
/// 1. Left/right rotate the heading at `turn_rate`, unless back (brake) is held.
/// 2. Forward accelerates by a constant `acceleration` along the heading;
///    otherwise velocity decays by `damping`.
/// 3. Speed is capped at `max_speed` without changing direction.
/// 4. Position advances by `velocity * dt`.
#[derive(Debug, Clone)]
pub struct HeadingThrust {
    config: HeadingThrustConfig,
}

impl HeadingThrust {
    pub fn new(config: HeadingThrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeadingThrustConfig {
        &self.config
    }
}

impl Default for HeadingThrust {
    fn default() -> Self {
        Self::new(HeadingThrustConfig::default())
    }
}

impl LocomotionModel for HeadingThrust {
    fn kind(&self) -> LocomotionKind {
        LocomotionKind::HeadingThrust
    }

    fn advance(&mut self, vehicle: &mut Vehicle2D, input: &InputState, dt: f32) {
        let dt = sanitize_dt(dt);
        let cfg = &self.config;

        if !input.is_held(Action::Back) {
            let mut steer = 0.0;
            if input.is_held(Action::Left) {
                steer += cfg.turn_rate * dt;
            }
            if input.is_held(Action::Right) {
                steer -= cfg.turn_rate * dt;
            }
            if steer != 0.0 {
                vehicle.rotate(steer);
            }
        }

        let mut desired = Vec2::ZERO;
        if input.is_held(Action::Forward) {
            desired += vehicle.heading_direction();
        }

        let velocity = vehicle.velocity_mut();
        if desired.length_squared() > 0.0 {
            *velocity += desired.normalize() * cfg.acceleration;
        } else {
            *velocity *= cfg.damping;
            if velocity.length_squared() < REST_SPEED * REST_SPEED {
                *velocity = Vec2::ZERO;
            }
        }

        let speed = velocity.length();
        if speed > cfg.max_speed {
            *velocity *= cfg.max_speed / speed;
        }

        let step = *velocity * dt;
        vehicle.translate(step);
    }
}
