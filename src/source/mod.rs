//! Setting sources: where raw values come from.

mod connection_strings;
mod env;
mod error;
mod file;
mod map;
mod stack;

use std::sync::Arc;

pub use connection_strings::ConnectionStrings;
pub use env::EnvSource;
pub use error::SourceError;
pub use file::FileSource;
pub use map::MapSource;
pub use stack::{SourceStack, SourceStackBuilder};

/// Read-only provider of raw setting values.
///
/// Implementations must be idempotent from the binder's point of view: asking
/// for the same key twice during a load yields the same answer.
pub trait SettingSource: Send + Sync + std::fmt::Debug {
    /// Returns the raw value for `key`, or `None` when the source has no value.
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError>;

    /// Returns every connection string this source knows about.
    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError>;
}

impl<S: SettingSource + ?Sized> SettingSource for &S {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        (**self).setting(key)
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        (**self).connection_strings()
    }
}

impl<S: SettingSource + ?Sized> SettingSource for Box<S> {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        (**self).setting(key)
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        (**self).connection_strings()
    }
}

impl<S: SettingSource + ?Sized> SettingSource for Arc<S> {
    fn setting(&self, key: &str) -> Result<Option<String>, SourceError> {
        (**self).setting(key)
    }

    fn connection_strings(&self) -> Result<ConnectionStrings, SourceError> {
        (**self).connection_strings()
    }
}
