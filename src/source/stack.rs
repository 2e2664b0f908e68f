use std::path::{Path, PathBuf};

use super::{ConnectionStrings, EnvSource, FileSource, SettingSource, SourceError};

/// A layer registered on the builder, opened when `build` runs.
#[derive(Debug)]
enum Layer {
    File { path: PathBuf, required: bool },
    Source(Box<dyn SettingSource>),
}

/// A stack of setting sources where later layers override earlier ones.
///
/// A setting is taken from the last layer that has a non-empty value for it.
/// Connection strings from every layer are merged, later layers replacing
/// entries with the same name.
///
/// ## Example
///
/// ```no_run
/// use app_settings::{AppSettings, SourceStack};
///
/// #[derive(Default, AppSettings)]
/// #[app_setting]
/// struct Settings {
///     pub name: String,
///     pub port: u16,
/// }
///
/// // defaults -> env overrides -> local file overrides env
/// let source = SourceStack::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let mut settings = Settings::default();
/// app_settings::load(&source, &mut settings)?;
/// # Ok::<(), app_settings::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct SourceStack {
    layers: Vec<Box<dyn SettingSource>>,
}

impl SourceStack {
    /// Creates a new source stack builder.
    pub fn builder() -> SourceStackBuilder {
        SourceStackBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl SettingSource for SourceStack {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        for layer in self.layers.iter().rev() {
            match layer.setting(key)? {
                Some(value) if !value.is_empty() => return Ok(Some(value)),
                _ => continue,
            }
        }
        Ok(None)
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        let mut merged = ConnectionStrings::new();
        for layer in &self.layers {
            merged.merge(layer.connection_strings()?);
        }
        Ok(merged)
    }
}

/// Builder for a [`SourceStack`].
///
/// Layers are applied in registration order, so later layers override
/// earlier ones.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SourceStackBuilder {
    layers: Vec<Layer>,
}

impl SourceStackBuilder {
    /// Adds a TOML settings file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.layers.push(Layer::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds the process environment, see [`EnvSource`] for the naming scheme.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let source = EnvSource::new(prefix, separator);
        self.layers.push(Layer::Source(Box::new(source)));
        self
    }

    /// Adds an arbitrary source.
    pub fn with_source(mut self, source: impl SettingSource + 'static) -> Self {
        self.layers.push(Layer::Source(Box::new(source)));
        self
    }

    /// Opens every file layer and assembles the stack.
    pub fn build(self) -> Result<SourceStack, SourceError> {
        let mut layers: Vec<Box<dyn SettingSource>> = Vec::with_capacity(self.layers.len());

        for layer in self.layers {
            match layer {
                Layer::File { path, required } => {
                    tracing::debug!(path = %path.display(), required, "opening settings file");
                    layers.push(Box::new(FileSource::open(&path, required)?));
                }
                Layer::Source(source) => layers.push(source),
            }
        }

        Ok(SourceStack { layers })
    }
}
