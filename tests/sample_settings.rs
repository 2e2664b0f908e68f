//! The sample settings struct, loaded from each of the shipped sources.

use std::io::Write;

use app_settings::{
    load, AppSettings, ConnectionStrings, EnvSource, Error, FileSource, MapSource, Setting,
    SourceStack,
};
use chrono::{DateTime, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Setting)]
enum EnumValues {
    #[default]
    Value1 = 1,
    Value2 = 2,
}

#[derive(Debug, Default, PartialEq, AppSettings)]
#[app_setting]
struct Settings {
    pub string_setting: String,
    #[app_setting(key = "StringSettingOverride")]
    pub overridden_setting: String,
    pub int_setting: i32,
    pub uint_setting: u32,
    pub date_time_setting: DateTime<Utc>,
    pub date_setting: Option<NaiveDate>,
    pub guid_setting: Uuid,
    pub float_setting: f32,
    pub decimal_setting: Decimal,
    pub enum_setting: EnumValues,
    pub enum_setting_int: EnumValues,
    #[app_setting(connection_string)]
    pub connection_strings: ConnectionStrings,
}

const GUID: &str = "8b4c8e2e-3f0e-4a43-9a2b-5d1f0c0f7e11";

fn expected() -> Settings {
    Settings {
        string_setting: "hello".into(),
        overridden_setting: "overridden".into(),
        int_setting: -5,
        uint_setting: 5,
        date_time_setting: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
        date_setting: NaiveDate::from_ymd_opt(2024, 3, 1),
        guid_setting: Uuid::parse_str(GUID).unwrap(),
        float_setting: 1.5,
        decimal_setting: Decimal::new(1999, 2),
        enum_setting: EnumValues::Value2,
        enum_setting_int: EnumValues::Value2,
        connection_strings: [("db", "host=a;port=5432")].into_iter().collect(),
    }
}

const SETTINGS_TOML: &str = r#"
[settings]
string_setting = "hello"
StringSettingOverride = "overridden"
int_setting = -5
uint_setting = 5
date_time_setting = 2024-03-01T10:00:00Z
date_setting = "2024-03-01"
guid_setting = "8b4c8e2e-3f0e-4a43-9a2b-5d1f0c0f7e11"
float_setting = 1.5
decimal_setting = "19.99"
enum_setting = "Value2"
enum_setting_int = 2

[connection_strings]
db = "host=a;port=5432"
"#;

#[test]
fn test_loads_from_file() -> Result<(), Error> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SETTINGS_TOML.as_bytes()).unwrap();

    let source = FileSource::open(file.path(), true)?;
    let mut settings = Settings::default();
    let report = load(&source, &mut settings)?;

    assert_eq!(settings, expected());
    assert!(report.is_complete());
    Ok(())
}

#[test]
fn test_loads_from_env_snapshot() -> Result<(), Error> {
    let source = EnvSource::new("SAMPLE", "__").with_vars([
        ("SAMPLE__string_setting", "hello"),
        ("SAMPLE__StringSettingOverride", "overridden"),
        ("SAMPLE__int_setting", "-5"),
        ("SAMPLE__uint_setting", "5"),
        ("SAMPLE__date_time_setting", "2024-03-01T12:00:00+02:00"),
        ("SAMPLE__date_setting", "2024-03-01"),
        ("SAMPLE__guid_setting", GUID),
        ("SAMPLE__float_setting", "1.5"),
        ("SAMPLE__decimal_setting", "19.99"),
        ("SAMPLE__enum_setting", "value2"),
        ("SAMPLE__enum_setting_int", "2"),
        ("SAMPLE__CONNECTIONSTRINGS__db", "host=a;port=5432"),
    ]);

    let mut settings = Settings::default();
    load(&source, &mut settings)?;

    assert_eq!(settings, expected());
    Ok(())
}

#[test]
fn test_stack_overrides_file_with_later_layers() -> Result<(), Error> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SETTINGS_TOML.as_bytes()).unwrap();

    let source = SourceStack::builder()
        .with_file(file.path(), true)
        .with_source(
            MapSource::new()
                .with_setting("int_setting", "7")
                .with_connection_string("cache", "redis://b"),
        )
        .build()?;

    let mut settings = Settings::default();
    load(&source, &mut settings)?;

    assert_eq!(settings.int_setting, 7);
    assert_eq!(settings.string_setting, "hello");
    assert_eq!(
        settings.connection_strings.names().collect::<Vec<_>>(),
        vec!["db", "cache"]
    );
    Ok(())
}

#[test]
fn test_bad_enum_and_guid_are_both_reported() {
    let source = MapSource::new()
        .with_setting("enum_setting", "Value3")
        .with_setting("guid_setting", "not-a-guid")
        .with_setting("int_setting", "12");
    let mut settings = Settings::default();

    let error = load(&source, &mut settings).unwrap_err();

    assert_eq!(
        error.keys().collect::<Vec<_>>(),
        vec!["guid_setting", "enum_setting"]
    );
    assert_eq!(settings.int_setting, 12);
    assert_eq!(settings.enum_setting, EnumValues::Value1);
}
