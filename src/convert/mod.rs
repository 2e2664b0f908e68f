//! Conversion of raw setting strings into typed values.
//!
//! Conversion is keyed by a closed set of semantic types ([`SettingType`]).
//! A [`Converter`] turns a raw string into a tagged [`SettingValue`], and the
//! [`Setting`] trait turns that value back into the concrete field type. The
//! binder never needs to know the concrete type of a field.

mod error;
mod parse;
mod setting;

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::source::ConnectionStrings;

pub use error::ConvertError;
pub use setting::Setting;

/// Shape of a fieldless enum as seen by the converter.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: &'static [EnumVariant],
}

#[derive(Debug, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: &'static str,
    pub discriminant: i64,
}

impl EnumDescriptor {
    /// Finds a variant by name, exact match first, then ASCII case-insensitive.
    pub fn by_name(&self, name: &str) -> Option<&EnumVariant> {
        self.variants
            .iter()
            .find(|variant| variant.name == name)
            .or_else(|| {
                self.variants
                    .iter()
                    .find(|variant| variant.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn by_discriminant(&self, discriminant: i64) -> Option<&EnumVariant> {
        self.variants
            .iter()
            .find(|variant| variant.discriminant == discriminant)
    }
}

/// The semantic type a field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingType {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Decimal,
    Bool,
    Char,
    String,
    DateTime,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    Uuid,
    Enum(&'static EnumDescriptor),
    /// The read-only connection-string mapping.
    ConnectionStrings,
    /// A type that can sit in a settings struct but has no scalar conversion.
    Unsupported(&'static str),
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "Decimal",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::NaiveDateTime => "NaiveDateTime",
            Self::NaiveDate => "NaiveDate",
            Self::NaiveTime => "NaiveTime",
            Self::Uuid => "Uuid",
            Self::Enum(descriptor) => descriptor.name,
            Self::ConnectionStrings => "ConnectionStrings",
            Self::Unsupported(name) => *name,
        };
        f.write_str(name)
    }
}

/// A converted value, tagged with its semantic type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Bool(bool),
    Char(char),
    String(String),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    NaiveDate(NaiveDate),
    NaiveTime(NaiveTime),
    Uuid(Uuid),
    Enum {
        descriptor: &'static EnumDescriptor,
        discriminant: i64,
    },
    ConnectionStrings(ConnectionStrings),
}

impl SettingValue {
    /// The semantic type this value carries.
    pub fn setting_type(&self) -> SettingType {
        match self {
            Self::I8(_) => SettingType::I8,
            Self::I16(_) => SettingType::I16,
            Self::I32(_) => SettingType::I32,
            Self::I64(_) => SettingType::I64,
            Self::I128(_) => SettingType::I128,
            Self::Isize(_) => SettingType::Isize,
            Self::U8(_) => SettingType::U8,
            Self::U16(_) => SettingType::U16,
            Self::U32(_) => SettingType::U32,
            Self::U64(_) => SettingType::U64,
            Self::U128(_) => SettingType::U128,
            Self::Usize(_) => SettingType::Usize,
            Self::F32(_) => SettingType::F32,
            Self::F64(_) => SettingType::F64,
            Self::Decimal(_) => SettingType::Decimal,
            Self::Bool(_) => SettingType::Bool,
            Self::Char(_) => SettingType::Char,
            Self::String(_) => SettingType::String,
            Self::DateTime(_) => SettingType::DateTime,
            Self::NaiveDateTime(_) => SettingType::NaiveDateTime,
            Self::NaiveDate(_) => SettingType::NaiveDate,
            Self::NaiveTime(_) => SettingType::NaiveTime,
            Self::Uuid(_) => SettingType::Uuid,
            Self::Enum { descriptor, .. } => SettingType::Enum(*descriptor),
            Self::ConnectionStrings(_) => SettingType::ConnectionStrings,
        }
    }
}

/// Converts raw strings into values of a requested [`SettingType`].
///
/// The binder goes through this trait only, so the conversion rules can be
/// swapped without touching the binding engine.
pub trait Converter {
    fn convert(&self, ty: &SettingType, raw: &str) -> Result<SettingValue, ConvertError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, ty: &SettingType, raw: &str) -> Result<SettingValue, ConvertError> {
        (**self).convert(ty, raw)
    }
}

/// The stock conversion rules.
///
/// Numbers and booleans ignore surrounding whitespace, strings are taken
/// verbatim. See the crate docs for the accepted date/time and identifier
/// formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl Converter for DefaultConverter {
    fn convert(&self, ty: &SettingType, raw: &str) -> Result<SettingValue, ConvertError> {
        let ty = *ty;
        let value = match ty {
            SettingType::I8 => SettingValue::I8(parse::number(ty, raw)?),
            SettingType::I16 => SettingValue::I16(parse::number(ty, raw)?),
            SettingType::I32 => SettingValue::I32(parse::number(ty, raw)?),
            SettingType::I64 => SettingValue::I64(parse::number(ty, raw)?),
            SettingType::I128 => SettingValue::I128(parse::number(ty, raw)?),
            SettingType::Isize => SettingValue::Isize(parse::number(ty, raw)?),
            SettingType::U8 => SettingValue::U8(parse::number(ty, raw)?),
            SettingType::U16 => SettingValue::U16(parse::number(ty, raw)?),
            SettingType::U32 => SettingValue::U32(parse::number(ty, raw)?),
            SettingType::U64 => SettingValue::U64(parse::number(ty, raw)?),
            SettingType::U128 => SettingValue::U128(parse::number(ty, raw)?),
            SettingType::Usize => SettingValue::Usize(parse::number(ty, raw)?),
            SettingType::F32 => SettingValue::F32(parse::number(ty, raw)?),
            SettingType::F64 => SettingValue::F64(parse::number(ty, raw)?),
            SettingType::Decimal => SettingValue::Decimal(parse::decimal(raw)?),
            SettingType::Bool => SettingValue::Bool(parse::boolean(raw)?),
            SettingType::Char => SettingValue::Char(parse::character(raw)?),
            SettingType::String => SettingValue::String(raw.to_string()),
            SettingType::DateTime => SettingValue::DateTime(parse::date_time(raw)?),
            SettingType::NaiveDateTime => {
                SettingValue::NaiveDateTime(parse::naive_date_time(raw)?)
            }
            SettingType::NaiveDate => SettingValue::NaiveDate(parse::naive_date(raw)?),
            SettingType::NaiveTime => SettingValue::NaiveTime(parse::naive_time(raw)?),
            SettingType::Uuid => SettingValue::Uuid(parse::uuid(raw)?),
            SettingType::Enum(descriptor) => SettingValue::Enum {
                descriptor,
                discriminant: parse::enumeration(descriptor, raw)?,
            },
            SettingType::ConnectionStrings | SettingType::Unsupported(_) => {
                return Err(ConvertError::Unsupported { ty });
            }
        };
        Ok(value)
    }
}

/// Converts `raw` into `T` using the stock rules.
///
/// ```
/// let port: u16 = app_settings::from_raw(" 8080 ")?;
/// assert_eq!(port, 8080);
/// # Ok::<(), app_settings::ConvertError>(())
/// ```
pub fn from_raw<T: Setting>(raw: &str) -> Result<T, ConvertError> {
    let value = DefaultConverter.convert(&T::setting_type(), raw)?;
    T::from_value(value)
}
