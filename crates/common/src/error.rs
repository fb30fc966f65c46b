/// A configuration value the simulation cannot run with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range: expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

impl ConfigError {
    /// Check `value` against a predicate and report the field name on failure.
    pub fn check(
        field: &'static str,
        value: f32,
        valid: impl FnOnce(f32) -> bool,
        expected: &'static str,
    ) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite {
                field,
                value: value as f64,
            });
        }
        if !valid(value) {
            return Err(ConfigError::OutOfRange {
                field,
                value: value as f64,
                expected,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_in_range() {
        assert!(ConfigError::check("damping", 0.5, |v| v > 0.0 && v < 1.0, "(0, 1)").is_ok());
    }

    #[test]
    fn check_reports_field() {
        let err = ConfigError::check("damping", 1.5, |v| v > 0.0 && v < 1.0, "(0, 1)").unwrap_err();
        assert!(err.to_string().contains("damping"));
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn check_rejects_nan() {
        let err = ConfigError::check("speed", f32::NAN, |_| true, "any").unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { .. }));
    }
}
