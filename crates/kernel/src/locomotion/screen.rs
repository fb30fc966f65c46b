use glam::Vec2;
use oceanspace_common::ConfigError;
use oceanspace_input::{Action, InputState};
use serde::{Deserialize, Serialize};

use super::{LocomotionKind, LocomotionModel, REST_SPEED};
use crate::vehicle::Vehicle2D;

/// Tunables for [`ScreenThrust`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenThrustConfig {
    /// Velocity added per tick along each held screen axis.
    pub acceleration: f32,
    /// Per-tick velocity multiplier, in (0, 1), applied regardless of input.
    pub friction: f32,
}

impl Default for ScreenThrustConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.02,
            friction: 0.95,
        }
    }
}

impl ScreenThrustConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check("acceleration", self.acceleration, |v| v >= 0.0, ">= 0")?;
        ConfigError::check("friction", self.friction, |v| v > 0.0 && v < 1.0, "(0, 1)")?;
        Ok(())
    }

    /// Speed reached when a single axis is held forever: `a·f / (1 − f)`.
    pub fn terminal_speed(&self) -> f32 {
        self.acceleration * self.friction / (1.0 - self.friction)
    }
}

/// Screen-relative thrust with friction.
///
/// Forward pushes toward −Z (up the screen), back toward +Z, left toward −X and
/// right toward +X. Velocity is in world units per tick: it is added to the
/// position once per tick and `dt` is not used.
#[derive(Debug, Clone)]
pub struct ScreenThrust {
    config: ScreenThrustConfig,
}

impl ScreenThrust {
    pub fn new(config: ScreenThrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreenThrustConfig {
        &self.config
    }
}

impl Default for ScreenThrust {
    fn default() -> Self {
        Self::new(ScreenThrustConfig::default())
    }
}

impl LocomotionModel for ScreenThrust {
    fn kind(&self) -> LocomotionKind {
        LocomotionKind::ScreenThrust
    }

    fn advance(&mut self, vehicle: &mut Vehicle2D, input: &InputState, _dt: f32) {
        let a = self.config.acceleration;
        let mut push = Vec2::ZERO;
        if input.is_held(Action::Forward) {
            push.y -= a;
        }
        if input.is_held(Action::Back) {
            push.y += a;
        }
        if input.is_held(Action::Left) {
            push.x -= a;
        }
        if input.is_held(Action::Right) {
            push.x += a;
        }

        let velocity = vehicle.velocity_mut();
        *velocity = (*velocity + push) * self.config.friction;
        if push == Vec2::ZERO && velocity.length_squared() < REST_SPEED * REST_SPEED {
            *velocity = Vec2::ZERO;
        }

        let step = *velocity;
        vehicle.translate(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_moves_up_the_screen() {
        let mut model = ScreenThrust::default();
        let mut vehicle = Vehicle2D::new();
        model.advance(&mut vehicle, &InputState::holding(&[Action::Forward]), 0.016);
        assert!(vehicle.velocity().y < 0.0);
        assert!(vehicle.position().y < 0.0);
        assert!((vehicle.velocity().y + 0.02 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn opposite_actions_cancel() {
        let mut model = ScreenThrust::default();
        let mut vehicle = Vehicle2D::new();
        let input = InputState::holding(&Action::ALL);
        for _ in 0..10 {
            model.advance(&mut vehicle, &input, 0.016);
        }
        assert_eq!(vehicle.velocity(), Vec2::ZERO);
        assert_eq!(vehicle.position(), Vec2::ZERO);
    }

    #[test]
    fn converges_to_terminal_speed() {
        let cfg = ScreenThrustConfig::default();
        let mut model = ScreenThrust::new(cfg);
        let mut vehicle = Vehicle2D::new();
        let right = InputState::holding(&[Action::Right]);

        let mut previous = 0.0;
        for _ in 0..500 {
            model.advance(&mut vehicle, &right, 0.016);
            let speed = vehicle.speed();
            assert!(speed <= cfg.terminal_speed() + 1e-5);
            assert!(speed >= previous - 1e-6);
            previous = speed;
        }
        assert!((vehicle.speed() - cfg.terminal_speed()).abs() < 1e-4);
        assert!((cfg.terminal_speed() - 0.38).abs() < 1e-5);
    }

    #[test]
    fn friction_decays_without_input() {
        let mut model = ScreenThrust::default();
        let mut vehicle = Vehicle2D::new().with_velocity(Vec2::new(0.3, -0.2));
        let idle = InputState::new();

        let mut previous = vehicle.speed();
        let mut ticks = 0;
        while vehicle.speed() > 1e-4 {
            model.advance(&mut vehicle, &idle, 0.016);
            assert!(vehicle.speed() < previous);
            previous = vehicle.speed();
            ticks += 1;
            assert!(ticks < 300, "did not converge");
        }
    }

    #[test]
    fn heading_is_left_to_the_smoother() {
        let mut model = ScreenThrust::default();
        let mut vehicle = Vehicle2D::new();
        model.advance(&mut vehicle, &InputState::holding(&[Action::Left]), 0.016);
        assert_eq!(vehicle.heading(), 0.0);
    }

    #[test]
    fn invalid_friction_rejected() {
        let cfg = ScreenThrustConfig {
            friction: 0.0,
            ..ScreenThrustConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
