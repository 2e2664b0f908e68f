use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{ConvertError, EnumDescriptor, SettingType};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn number<T>(ty: SettingType, raw: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .map_err(|e| ConvertError::invalid(ty, raw, e))
}

pub(super) fn decimal(raw: &str) -> Result<Decimal, ConvertError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ConvertError::invalid(SettingType::Decimal, raw, e))
}

pub(super) fn boolean(raw: &str) -> Result<bool, ConvertError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    Err(ConvertError::invalid(
        SettingType::Bool,
        raw,
        "expected `true` or `false`",
    ))
}

pub(super) fn character(raw: &str) -> Result<char, ConvertError> {
    raw.parse()
        .map_err(|e| ConvertError::invalid(SettingType::Char, raw, e))
}

/// Offset-aware timestamps; values without an offset are taken as UTC.
pub(super) fn date_time(raw: &str) -> Result<DateTime<FixedOffset>, ConvertError> {
    let trimmed = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(value);
    }
    if let Ok(value) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(value);
    }
    let naive = naive_date_time(raw)
        .map_err(|_| ConvertError::invalid(SettingType::DateTime, raw, "unrecognized date/time"))?;
    Ok(naive.and_utc().fixed_offset())
}

/// Accepts a date without a time as midnight.
pub(super) fn naive_date_time(raw: &str) -> Result<NaiveDateTime, ConvertError> {
    let trimmed = raw.trim();
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| ConvertError::invalid(SettingType::NaiveDateTime, raw, e))
}

pub(super) fn naive_date(raw: &str) -> Result<NaiveDate, ConvertError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| ConvertError::invalid(SettingType::NaiveDate, raw, e))
}

pub(super) fn naive_time(raw: &str) -> Result<NaiveTime, ConvertError> {
    let trimmed = raw.trim();
    for format in NAIVE_TIME_FORMATS {
        if let Ok(value) = NaiveTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }
    Err(ConvertError::invalid(
        SettingType::NaiveTime,
        raw,
        "expected `HH:MM` or `HH:MM:SS`",
    ))
}

pub(super) fn uuid(raw: &str) -> Result<Uuid, ConvertError> {
    Uuid::parse_str(raw.trim()).map_err(|e| ConvertError::invalid(SettingType::Uuid, raw, e))
}

/// Resolves a variant by numeric discriminant or by name.
pub(super) fn enumeration(
    descriptor: &'static EnumDescriptor,
    raw: &str,
) -> Result<i64, ConvertError> {
    let trimmed = raw.trim();
    let variant = match trimmed.parse::<i64>() {
        Ok(discriminant) => descriptor.by_discriminant(discriminant),
        Err(_) => descriptor.by_name(trimmed),
    };

    variant.map(|variant| variant.discriminant).ok_or_else(|| {
        let known: Vec<&str> = descriptor.variants.iter().map(|v| v.name).collect();
        ConvertError::invalid(
            SettingType::Enum(descriptor),
            raw,
            format!("expected one of {}", known.join(", ")),
        )
    })
}

/// Narrows an offset-aware timestamp to UTC.
pub(super) fn to_utc(value: DateTime<FixedOffset>) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}
