use crate::bind::LoadError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error type for the app-settings library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("setting source error: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
