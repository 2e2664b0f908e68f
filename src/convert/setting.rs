use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{parse, ConvertError, SettingType, SettingValue};
use crate::source::ConnectionStrings;

/// A type that can be the declared type of a settings field.
///
/// `setting_type` tells the converter what to produce, and `from_value` takes
/// the converted value back. Derive it for fieldless enums with
/// `#[derive(Setting)]`.
pub trait Setting: Sized {
    fn setting_type() -> SettingType;

    fn from_value(value: SettingValue) -> Result<Self, ConvertError>;
}

fn mismatch<T: Setting>(value: &SettingValue) -> ConvertError {
    ConvertError::Mismatch {
        expected: T::setting_type(),
        found: value.setting_type(),
    }
}

macro_rules! impl_setting {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Setting for $ty {
                fn setting_type() -> SettingType {
                    SettingType::$variant
                }

                fn from_value(value: SettingValue) -> Result<Self, ConvertError> {
                    match value {
                        SettingValue::$variant(inner) => Ok(inner),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_setting! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    bool => Bool,
    char => Char,
    String => String,
    DateTime<FixedOffset> => DateTime,
    NaiveDateTime => NaiveDateTime,
    NaiveDate => NaiveDate,
    NaiveTime => NaiveTime,
    Uuid => Uuid,
    ConnectionStrings => ConnectionStrings,
}

impl Setting for DateTime<Utc> {
    fn setting_type() -> SettingType {
        SettingType::DateTime
    }

    fn from_value(value: SettingValue) -> Result<Self, ConvertError> {
        match value {
            SettingValue::DateTime(inner) => Ok(parse::to_utc(inner)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: Setting> Setting for Option<T> {
    fn setting_type() -> SettingType {
        T::setting_type()
    }

    fn from_value(value: SettingValue) -> Result<Self, ConvertError> {
        T::from_value(value).map(Some)
    }
}

// Map shapes other than `ConnectionStrings` may sit in a settings struct, but
// nothing converts into them.
macro_rules! impl_unsupported_map {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Setting for $ty {
                fn setting_type() -> SettingType {
                    SettingType::Unsupported($name)
                }

                fn from_value(_value: SettingValue) -> Result<Self, ConvertError> {
                    Err(ConvertError::Unsupported {
                        ty: Self::setting_type(),
                    })
                }
            }
        )*
    };
}

impl_unsupported_map! {
    HashMap<String, String> => "HashMap<String, String>",
    BTreeMap<String, String> => "BTreeMap<String, String>",
    IndexMap<String, String> => "IndexMap<String, String>",
}
