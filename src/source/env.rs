use std::collections::BTreeMap;
use std::env::{self, VarError};

use super::{ConnectionStrings, SettingSource, SourceError};

/// Path segment under which connection strings live in the environment.
const CONNECTION_STRINGS_SEGMENT: &str = "CONNECTIONSTRINGS";

/// Reads settings from environment variables.
///
/// With prefix `MYAPP` and separator `__`, the setting `Port` is read from
/// `MYAPP__Port` and the connection string `db` from
/// `MYAPP__CONNECTIONSTRINGS__db`. An empty prefix reads `Port` directly and
/// connection strings from `CONNECTIONSTRINGS__db`.
///
/// Keys are matched verbatim; no case folding is applied.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    snapshot: Option<BTreeMap<String, String>>,
}

impl EnvSource {
    /// Creates a source that reads the live process environment on each lookup.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
            snapshot: None,
        }
    }

    /// Reads from a fixed set of variables instead of the process environment.
    #[must_use]
    pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.snapshot = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    fn var_name(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", self.prefix, self.separator, key)
        }
    }

    fn lookup(&self, name: &str) -> Result<Option<String>, SourceError> {
        if let Some(vars) = &self.snapshot {
            return Ok(vars.get(name).cloned());
        }

        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(SourceError::NotUnicode(name.to_string())),
        }
    }

    /// Variables whose names start with `prefix`, with the prefix stripped.
    /// Only matching values need to be unicode.
    fn vars_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, SourceError> {
        if let Some(vars) = &self.snapshot {
            return Ok(vars
                .iter()
                .filter_map(|(key, value)| {
                    let name = key.strip_prefix(prefix)?;
                    Some((name.to_string(), value.clone()))
                })
                .collect());
        }

        let mut vars = Vec::new();
        for (key, value) in env::vars_os() {
            let Some(key) = key.to_str() else {
                continue;
            };
            let Some(name) = key.strip_prefix(prefix) else {
                continue;
            };
            let value = value
                .into_string()
                .map_err(|_| SourceError::NotUnicode(key.to_string()))?;
            vars.push((name.to_string(), value));
        }
        Ok(vars)
    }
}

impl SettingSource for EnvSource {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        self.lookup(&self.var_name(key))
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        let prefix_with_sep = format!(
            "{}{}",
            self.var_name(CONNECTION_STRINGS_SEGMENT),
            self.separator
        );

        let mut strings = ConnectionStrings::new();
        for (name, value) in self.vars_with_prefix(&prefix_with_sep)? {
            if name.is_empty() {
                continue;
            }
            strings.insert(name, value);
        }

        Ok(strings)
    }
}
