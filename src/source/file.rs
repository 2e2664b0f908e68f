//! File-based setting source.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use toml::{Table, Value};

use super::{ConnectionStrings, SettingSource, SourceError};

/// On-disk layout of a settings file.
///
/// ```toml
/// [settings]
/// Name = "svc"
/// Port = 8080
///
/// [connection_strings]
/// db = "host=localhost;port=5432"
/// ```
#[derive(Debug, Default, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    settings: Table,
    #[serde(default)]
    connection_strings: IndexMap<String, Value>,
}

/// A setting source backed by a TOML file.
///
/// The file is read once when the source is opened. Files can be marked as
/// required or optional; an optional file that doesn't exist behaves as an
/// empty source.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Option<PathBuf>,
    settings: Table,
    connection_strings: IndexMap<String, Value>,
}

impl FileSource {
    /// Opens and parses a settings file.
    ///
    /// If `required` is true, a missing file is an error.
    pub fn open(path: impl AsRef<Path>, required: bool) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let document = load_settings_file(path, required)?.unwrap_or_default();
        Ok(Self {
            path: Some(path.to_path_buf()),
            settings: document.settings,
            connection_strings: document.connection_strings,
        })
    }

    /// Parses settings from an in-memory TOML document.
    pub fn parse(contents: &str) -> Result<Self, SourceError> {
        let document: SettingsDocument =
            toml::from_str(contents).map_err(|e| SourceError::ParseError {
                path: PathBuf::new(),
                source: e,
            })?;
        Ok(Self {
            path: None,
            settings: document.settings,
            connection_strings: document.connection_strings,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SettingSource for FileSource {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        self.settings
            .get(key)
            .map(|value| value_to_string(value, key))
            .transpose()
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        let mut strings = ConnectionStrings::new();
        for (name, value) in &self.connection_strings {
            let Value::String(value) = value else {
                return Err(SourceError::NonStringConnection(name.clone()));
            };
            strings.insert(name.as_str(), value.as_str());
        }
        Ok(strings)
    }
}

/// Loads and parses a settings file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_settings_file(
    path: &Path,
    required: bool,
) -> Result<Option<SettingsDocument>, SourceError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let document = toml::from_str(&contents).map_err(|e| SourceError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(document))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(SourceError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(SourceError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Renders a scalar TOML value as the raw string handed to conversion.
fn value_to_string(value: &Value, key: &str) -> Result<String, SourceError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(SourceError::NonScalar(key.to_string())),
    }
}
