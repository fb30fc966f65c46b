use glam::{Vec2, Vec3};
use oceanspace_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Closed-form wave displacement shared by every patch.
///
/// `height(x, y, t) = amplitude.x · sin(x · frequency.x + t · speed.x)
///                  + amplitude.y · cos(y · frequency.y + t · speed.y)`
///
/// `x` and `y` are patch-local coordinates, so a patch's heights do not depend
/// on where the tiler has placed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveField {
    pub amplitude: Vec2,
    pub frequency: Vec2,
    pub speed: Vec2,
}

impl Default for WaveField {
    fn default() -> Self {
        Self::canonical()
    }
}

impl WaveField {
    /// The host-evaluated ocean.
    pub fn canonical() -> Self {
        Self {
            amplitude: Vec2::new(0.3, 0.3),
            frequency: Vec2::new(0.1, 0.1),
            speed: Vec2::new(1.0, 1.0),
        }
    }

    /// Shorter wavelength and slower swell, with different speeds per axis. Not visually equivalent to [`canonical`](Self::canonical).
    pub fn shader_variant() -> Self {
        Self {
            amplitude: Vec2::new(0.3, 0.3),
            frequency: Vec2::new(0.15, 0.15),
            speed: Vec2::new(0.4, 0.2),
        }
    }

    /// A field with zero amplitude.
    pub fn calm() -> Self {
        Self {
            amplitude: Vec2::ZERO,
            ..Self::canonical()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("amplitude.x", self.amplitude.x),
            ("amplitude.y", self.amplitude.y),
            ("frequency.x", self.frequency.x),
            ("frequency.y", self.frequency.y),
            ("speed.x", self.speed.x),
            ("speed.y", self.speed.y),
        ] {
            ConfigError::check(field, value, |_| true, "finite")?;
        }
        Ok(())
    }

    pub fn height(&self, x: f32, y: f32, t: f32) -> f32 {
        self.amplitude.x * (x * self.frequency.x + t * self.speed.x).sin()
            + self.amplitude.y * (y * self.frequency.y + t * self.speed.y).cos()
    }

    /// Largest displacement the field can produce.
    pub fn max_height(&self) -> f32 {
        self.amplitude.x.abs() + self.amplitude.y.abs()
    }
}

/// Where wave heights are evaluated each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavePath {
    /// Every patch's heights and normals are rewritten on the host.
    #[default]
    Cpu,
    /// Host evaluation is skipped; only elapsed time is forwarded to the shader.
    Gpu,
}

impl std::str::FromStr for WavePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" | "host" => Ok(WavePath::Cpu),
            "gpu" | "shader" => Ok(WavePath::Gpu),
            other => Err(format!("unknown wave path '{other}' (expected cpu or gpu)")),
        }
    }
}

/// Recompute per-vertex normals of a `(segments + 1)²` height grid.
///
/// Rows run from local +y to local −y and local −y maps to world +z, so the
/// returned normals are in world space with +Y up. Uses central differences,
/// one-sided on the borders.
pub(crate) fn recompute_normals(heights: &[f32], normals: &mut [Vec3], segments: usize, spacing: f32) {
    let side = segments + 1;
    debug_assert_eq!(heights.len(), side * side);
    debug_assert_eq!(normals.len(), side * side);

    let at = |i: usize, j: usize| heights[j * side + i];
    for j in 0..side {
        let (up, down) = (j.saturating_sub(1), (j + 1).min(segments));
        for i in 0..side {
            let (left, right) = (i.saturating_sub(1), (i + 1).min(segments));
            let dh_dx = (at(right, j) - at(left, j)) / ((right - left) as f32 * spacing);
            // Row index grows toward local −y.
            let dh_dy = (at(i, up) - at(i, down)) / ((down - up) as f32 * spacing);
            normals[j * side + i] = Vec3::new(-dh_dx, 1.0, dh_dy).normalize();
        }
    }
}
