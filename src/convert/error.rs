use thiserror::Error;

use super::SettingType;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("type `{ty}` cannot be loaded from a setting value")]
    Unsupported { ty: SettingType },

    #[error("cannot convert {value:?} to `{ty}`: {source}")]
    Invalid {
        ty: SettingType,
        value: String,
        source: BoxError,
    },

    #[error("expected a `{expected}` value, got `{found}`")]
    Mismatch {
        expected: SettingType,
        found: SettingType,
    },
}

impl ConvertError {
    pub(crate) fn invalid(ty: SettingType, value: &str, source: impl Into<BoxError>) -> Self {
        Self::Invalid {
            ty,
            value: value.to_string(),
            source: source.into(),
        }
    }
}
