use thiserror::Error;

use crate::convert::ConvertError;
use crate::source::SourceError;

/// A single field that failed to load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FieldError {
    #[error("failed to fetch setting '{key}': {source}")]
    Fetch { key: String, source: SourceError },

    #[error("failed to convert setting '{key}': {source}")]
    Convert { key: String, source: ConvertError },
}

impl FieldError {
    /// External key of the failing field.
    pub fn key(&self) -> &str {
        match self {
            Self::Fetch { key, .. } | Self::Convert { key, .. } => key,
        }
    }
}

/// Every field failure from one load, in discovery order.
///
/// Never empty: a load with no failures succeeds instead.
#[derive(Debug, Error)]
#[error("{} errors loading settings: {}", .failures.len(), join_keys(.failures))]
pub struct LoadError {
    failures: Vec<FieldError>,
}

impl LoadError {
    pub(crate) fn new(failures: Vec<FieldError>) -> Self {
        debug_assert!(!failures.is_empty());
        Self { failures }
    }

    pub fn failures(&self) -> &[FieldError] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<FieldError> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(FieldError::key)
    }
}

fn join_keys(failures: &[FieldError]) -> String {
    failures
        .iter()
        .map(FieldError::key)
        .collect::<Vec<_>>()
        .join(", ")
}
