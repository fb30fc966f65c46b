use std::path::PathBuf;

use oceanspace_assets::AssetError;
use oceanspace_common::ConfigError;

/// Why a session never started ticking.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("vehicle asset failed to load: {0}")]
    Asset(#[from] AssetError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
