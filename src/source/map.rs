use std::collections::HashMap;

use super::{ConnectionStrings, SettingSource, SourceError};

/// An in-memory source, mostly useful for tests and for defaults layered
/// underneath real sources.
///
/// ```
/// use app_settings::{MapSource, SettingSource};
///
/// let source = MapSource::new()
///     .with_setting("Port", "8080")
///     .with_connection_string("db", "host=localhost");
///
/// assert_eq!(source.setting("Port")?.as_deref(), Some("8080"));
/// # Ok::<(), app_settings::SourceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    settings: HashMap<String, String>,
    connection_strings: ConnectionStrings,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_connection_string(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.connection_strings.insert(name, value);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |source, (key, value)| source.with_setting(key, value))
    }
}

impl SettingSource for MapSource {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        Ok(self.settings.get(key).cloned())
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        Ok(self.connection_strings.clone())
    }
}
