//! Load application settings into your own structs.
//!
//! Mark a struct (or some of its fields) with `#[app_setting]`, derive
//! [`AppSettings`], and hand it to [`load`] together with any
//! [`SettingSource`]. Every eligible field is looked up by its key, converted
//! to its declared type and assigned. Failures are collected and reported
//! together once every field has been tried.
//!
//! ```
//! use app_settings::{AppSettings, ConnectionStrings, MapSource, Setting};
//!
//! #[derive(Debug, Default, PartialEq, Setting)]
//! enum Mode {
//!     #[default]
//!     Active = 1,
//!     Passive = 2,
//! }
//!
//! #[derive(Default, AppSettings)]
//! #[app_setting]
//! struct Settings {
//!     pub name: String,
//!     #[app_setting(key = "ServicePort")]
//!     pub port: u16,
//!     pub mode: Mode,
//!     #[app_setting(connection_string)]
//!     pub connections: ConnectionStrings,
//! }
//!
//! let source = MapSource::new()
//!     .with_setting("name", "svc")
//!     .with_setting("ServicePort", "8080")
//!     .with_setting("mode", "2")
//!     .with_connection_string("db", "host=a");
//!
//! let mut settings = Settings::default();
//! app_settings::load(&source, &mut settings)?;
//!
//! assert_eq!(settings.port, 8080);
//! assert_eq!(settings.mode, Mode::Passive);
//! assert_eq!(settings.connections.get("db"), Some("host=a"));
//! # Ok::<(), app_settings::LoadError>(())
//! ```

pub mod bind;
pub mod convert;
mod error;
pub mod source;

pub use bind::{discover, load, AppSettings, Binder, FieldError, LoadError, LoadReport};
pub use convert::{from_raw, ConvertError, Converter, DefaultConverter, Setting};
pub use error::Error;
pub use source::{
    ConnectionStrings, EnvSource, FileSource, MapSource, SettingSource, SourceError, SourceStack,
};

/// Derives [`AppSettings`] for a struct with named fields.
///
/// * `#[app_setting]` on the struct makes every public field eligible.
/// * `#[app_setting]` on a field makes that field eligible on its own.
/// * `#[app_setting(key = "Name")]` looks the field up under `Name`.
/// * `#[app_setting(connection_string)]` fills a [`ConnectionStrings`] field
///   with every connection string of the source.
/// * `#[app_setting(read_only)]` keeps an eligible field from being assigned.
///
/// Only `pub` fields take part; marking a private field is a compile error.
pub use app_settings_derive::AppSettings;

/// Derives [`Setting`] for a fieldless enum, so it can be loaded by variant
/// name or by discriminant.
pub use app_settings_derive::Setting;
