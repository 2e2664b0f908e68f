use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a [`SettingSource`](super::SettingSource) while
/// producing values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("required settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("setting '{0}' is not a scalar value")]
    NonScalar(String),

    #[error("connection string '{0}' is not a string value")]
    NonStringConnection(String),

    #[error("environment variable '{0}' is not valid unicode")]
    NotUnicode(String),
}
