//! The binding loop: fetch, convert and assign every eligible field, then
//! report all failures at once.

use tracing::{error, info, warn};

use super::discover::{discover, AppSettings, FieldDescriptor};
use super::error::{FieldError, LoadError};
use crate::convert::{ConvertError, Converter, DefaultConverter, SettingType, SettingValue};
use crate::source::SettingSource;

/// Summary of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys whose values were assigned.
    pub loaded: Vec<&'static str>,
    /// Keys the source had no value for; the fields kept their prior values.
    pub missing: Vec<&'static str>,
    /// Eligible members skipped because they are not writable.
    pub read_only: Vec<&'static str>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.read_only.is_empty()
    }
}

/// What happened to one field.
enum FieldOutcome {
    Loaded,
    Missing,
    ReadOnly,
}

/// Loads settings structs using a configurable [`Converter`].
#[derive(Debug, Clone, Default)]
pub struct Binder<C = DefaultConverter> {
    converter: C,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Converter> Binder<C> {
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    /// Populates `target` from `source`.
    ///
    /// Every eligible field is attempted exactly once. A field that fails keeps
    /// its previous value, and all failures are returned together once the
    /// traversal is over. Missing values and read-only fields are not failures.
    pub fn load<T, S>(&self, source: &S, target: &mut T) -> Result<LoadReport, LoadError>
    where
        T: AppSettings,
        S: SettingSource + ?Sized,
    {
        let mut report = LoadReport::default();
        let mut failures = Vec::new();

        for field in discover::<T>() {
            info!(
                member = field.member_name,
                key = field.external_key,
                "loading setting"
            );

            match self.load_field(&field, source, target) {
                Ok(FieldOutcome::Loaded) => report.loaded.push(field.external_key),
                Ok(FieldOutcome::Missing) => report.missing.push(field.external_key),
                Ok(FieldOutcome::ReadOnly) => report.read_only.push(field.member_name),
                Err(failure) => {
                    error!(key = field.external_key, error = %failure, "loading setting failed");
                    failures.push(failure);
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(LoadError::new(failures))
        }
    }

    fn load_field<T, S>(
        &self,
        field: &FieldDescriptor<T>,
        source: &S,
        target: &mut T,
    ) -> Result<FieldOutcome, FieldError>
    where
        S: SettingSource + ?Sized,
    {
        let key = field.external_key;

        if !field.writable {
            warn!(
                type_name = std::any::type_name::<T>(),
                member = field.member_name,
                "member is not writable; skipping"
            );
            return Ok(FieldOutcome::ReadOnly);
        }

        let value = if field.is_connection_string_collection {
            let strings = source.connection_strings().map_err(|e| FieldError::Fetch {
                key: key.to_string(),
                source: e,
            })?;
            SettingValue::ConnectionStrings(strings)
        } else {
            let raw = source.setting(key).map_err(|e| FieldError::Fetch {
                key: key.to_string(),
                source: e,
            })?;
            let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
                warn!(key, "no value found");
                return Ok(FieldOutcome::Missing);
            };
            let value = self
                .converter
                .convert(&field.declared_type, &raw)
                .map_err(|e| FieldError::Convert {
                    key: key.to_string(),
                    source: e,
                })?;
            if field.connection_string_marker {
                return Err(FieldError::Convert {
                    key: key.to_string(),
                    source: ConvertError::Mismatch {
                        expected: SettingType::ConnectionStrings,
                        found: field.declared_type,
                    },
                });
            }
            value
        };

        field
            .assign(target, value)
            .map_err(|e| FieldError::Convert {
                key: key.to_string(),
                source: e,
            })?;
        Ok(FieldOutcome::Loaded)
    }
}

/// Populates `target` from `source` with the stock conversion rules.
///
/// ```
/// use app_settings::{AppSettings, MapSource};
///
/// #[derive(Default, AppSettings)]
/// #[app_setting]
/// struct Settings {
///     pub name: String,
///     pub port: u16,
/// }
///
/// let source = MapSource::new()
///     .with_setting("name", "svc")
///     .with_setting("port", "8080");
///
/// let mut settings = Settings::default();
/// app_settings::load(&source, &mut settings)?;
///
/// assert_eq!(settings.name, "svc");
/// assert_eq!(settings.port, 8080);
/// # Ok::<(), app_settings::LoadError>(())
/// ```
pub fn load<T, S>(source: &S, target: &mut T) -> Result<LoadReport, LoadError>
where
    T: AppSettings,
    S: SettingSource + ?Sized,
{
    Binder::new().load(source, target)
}
