use oceanspace_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Decorative bob, pitch and roll driven by wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    pub enabled: bool,
    pub bob_amplitude: f32,
    pub bob_rate: f32,
    pub pitch_amplitude: f32,
    pub pitch_rate: f32,
    pub roll_amplitude: f32,
    pub roll_rate: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bob_amplitude: 0.1,
            bob_rate: 2.0,
            pitch_amplitude: 0.02,
            pitch_rate: 1.5,
            roll_amplitude: 0.02,
            roll_rate: 1.2,
        }
    }
}

/// Offsets to apply to the vehicle's visual transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwayPose {
    /// Vertical offset added to the ride height.
    pub lift: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl SwayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("bob_amplitude", self.bob_amplitude),
            ("bob_rate", self.bob_rate),
            ("pitch_amplitude", self.pitch_amplitude),
            ("pitch_rate", self.pitch_rate),
            ("roll_amplitude", self.roll_amplitude),
            ("roll_rate", self.roll_rate),
        ] {
            ConfigError::check(field, value, |_| true, "finite")?;
        }
        Ok(())
    }

    /// Sample the sway at `elapsed` seconds. Disabled sway is the zero pose.
    pub fn sample(&self, elapsed: f32) -> SwayPose {
        if !self.enabled {
            return SwayPose::default();
        }
        SwayPose {
            lift: (elapsed * self.bob_rate).sin() * self.bob_amplitude,
            pitch: (elapsed * self.pitch_rate).sin() * self.pitch_amplitude,
            roll: (elapsed * self.roll_rate).sin() * self.roll_amplitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sway_is_bounded_by_amplitudes() {
        let cfg = SwayConfig::default();
        for i in 0..1_000 {
            let pose = cfg.sample(i as f32 * 0.037);
            assert!(pose.lift.abs() <= cfg.bob_amplitude + 1e-6);
            assert!(pose.pitch.abs() <= cfg.pitch_amplitude + 1e-6);
            assert!(pose.roll.abs() <= cfg.roll_amplitude + 1e-6);
        }
    }

    #[test]
    fn sway_is_a_function_of_time_only() {
        let cfg = SwayConfig::default();
        assert_eq!(cfg.sample(3.25), cfg.sample(3.25));
        assert_eq!(cfg.sample(0.0), SwayPose::default());
    }

    #[test]
    fn disabled_sway_is_still() {
        let cfg = SwayConfig {
            enabled: false,
            ..SwayConfig::default()
        };
        assert_eq!(cfg.sample(1.7), SwayPose::default());
    }
}
