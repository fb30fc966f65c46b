use std::path::Path;

use oceanspace_common::ConfigError;
use oceanspace_kernel::{HeadingConfig, LocomotionConfig, SwayConfig};
use oceanspace_render::CameraRig;
use oceanspace_stream::{TilerConfig, WaveField, WavePath};
use serde::{Deserialize, Serialize};

use crate::error::ConfigFileError;

/// Every tunable of a session. Missing sections fall back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub locomotion: LocomotionConfig,
    pub heading: HeadingConfig,
    pub sway: SwayConfig,
    pub camera: CameraRig,
    pub tiler: TilerConfig,
    pub waves: WaveField,
    pub wave_path: WavePath,
}

impl SimConfig {
    /// Read a YAML or JSON file, chosen by extension, and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&text)?,
            Some("json") => Self::from_json(&text)?,
            _ => return Err(ConfigFileError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), model = %config.locomotion.kind(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.heading.validate()?;
        self.sway.validate()?;
        self.camera.validate()?;
        self.tiler.validate()?;
        self.waves.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oceanspace_kernel::LocomotionKind;
    use std::io::Write;

    fn write_temp(suffix: &str, text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.locomotion.kind(), LocomotionKind::HeadingThrust);
        assert_eq!(config.wave_path, WavePath::Cpu);
        assert_eq!(config.tiler.patch_count(), 121);
    }

    #[test]
    fn loads_partial_yaml() {
        let file = write_temp(
            ".yaml",
            "locomotion:\n  model: screen_thrust\n  friction: 0.9\ntiler:\n  tile_size: 50\nwave_path: gpu\n",
        );
        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.locomotion.kind(), LocomotionKind::ScreenThrust);
        match config.locomotion {
            LocomotionConfig::ScreenThrust(c) => {
                assert_eq!(c.friction, 0.9);
                assert_eq!(c.acceleration, 0.02);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(config.tiler.tile_size, 50.0);
        assert_eq!(config.tiler.segments, 32);
        assert_eq!(config.wave_path, WavePath::Gpu);
        assert_eq!(config.camera, CameraRig::default());
    }

    #[test]
    fn loads_json() {
        let file = write_temp(
            ".json",
            r#"{"camera": {"height": 15.0}, "waves": {"amplitude": [0.5, 0.1]}}"#,
        );
        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.camera.height, 15.0);
        assert_eq!(config.camera.distance, 20.0);
        assert_eq!(config.waves.amplitude, glam::Vec2::new(0.5, 0.1));
        assert_eq!(config.waves.frequency, WaveField::canonical().frequency);
    }

    #[test]
    fn yaml_round_trip() {
        let config = SimConfig {
            locomotion: LocomotionConfig::for_kind(LocomotionKind::ScreenThrust),
            wave_path: WavePath::Gpu,
            ..SimConfig::default()
        };
        let text = config.to_yaml().unwrap();
        assert_eq!(SimConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_values() {
        let file = write_temp(".yaml", "tiler:\n  tile_size: -1\n");
        let err = SimConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Invalid(_)), "{err}");
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".toml", "[tiler]\n");
        let err = SimConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load("/no/such/dir/ocean.yaml").unwrap_err();
        assert!(matches!(err, ConfigFileError::Io { .. }));
    }
}
