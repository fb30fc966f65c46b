use glam::Vec2;
use oceanspace_common::{ConfigError, shortest_arc, wrap_angle};
use serde::{Deserialize, Serialize};

/// Tunables for [`HeadingSmoother`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Fraction of the remaining angular distance covered per tick, in (0, 1].
    pub ease_fraction: f32,
    /// Below this speed the facing is left where it is.
    pub min_speed: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            ease_fraction: 0.1,
            min_speed: 0.01,
        }
    }
}

impl HeadingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check(
            "ease_fraction",
            self.ease_fraction,
            |v| v > 0.0 && v <= 1.0,
            "(0, 1]",
        )?;
        ConfigError::check("min_speed", self.min_speed, |v| v >= 0.0, ">= 0")?;
        Ok(())
    }
}

/// Move `current` toward `target` by `fraction` of the shortest arc between them.
pub fn ease_heading(current: f32, target: f32, fraction: f32) -> f32 {
    wrap_angle(current + shortest_arc(current, target) * fraction)
}

/// Eases the rendered facing toward the direction of travel.
///
/// The facing is purely visual: it never feeds back into the vehicle's physics
/// heading or velocity.
#[derive(Debug, Clone)]
pub struct HeadingSmoother {
    config: HeadingConfig,
    facing: f32,
}

impl HeadingSmoother {
    pub fn new(config: HeadingConfig, initial: f32) -> Self {
        Self {
            config,
            facing: wrap_angle(initial),
        }
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Advance one tick toward `atan2(velocity.x, velocity.z)`.
    pub fn update(&mut self, velocity: Vec2) -> f32 {
        if velocity.length() > self.config.min_speed {
            let target = velocity.x.atan2(velocity.y);
            self.facing = ease_heading(self.facing, target, self.config.ease_fraction);
        }
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn short_path_across_the_seam() {
        let next = ease_heading(3.0, -3.0, 0.1);
        let short_arc = TAU - 6.0;
        // Moves forward (toward +π) by 10% of the ~0.28 rad short path.
        let moved = shortest_arc(3.0, next);
        assert!((moved - short_arc * 0.1).abs() < 1e-4, "moved={moved}");
        assert!(next > 3.0 || next < -3.0);
    }

    #[test]
    fn step_never_exceeds_fraction_of_distance() {
        let targets = [-3.1, -1.0, 0.0, 0.5, 2.0, 3.1];
        for &current in &targets {
            for &target in &targets {
                let next = ease_heading(current, target, 0.1);
                let step = shortest_arc(current, next).abs();
                let distance = shortest_arc(current, target).abs();
                assert!(step <= distance * 0.1 + 1e-5);
            }
        }
    }

    #[test]
    fn result_stays_wrapped() {
        let next = ease_heading(PI - 0.01, -PI + 0.01, 1.0);
        assert!(next > -PI && next <= PI);
    }

    #[test]
    fn smoother_ignores_slow_motion() {
        let mut s = HeadingSmoother::new(HeadingConfig::default(), 0.5);
        assert_eq!(s.update(Vec2::new(0.005, 0.0)), 0.5);
    }

    #[test]
    fn smoother_converges_on_travel_direction() {
        let mut s = HeadingSmoother::new(HeadingConfig::default(), 0.0);
        for _ in 0..200 {
            s.update(Vec2::new(1.0, 0.0));
        }
        assert!((s.facing() - FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn zero_fraction_rejected() {
        let cfg = HeadingConfig {
            ease_fraction: 0.0,
            ..HeadingConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
