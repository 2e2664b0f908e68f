use app_settings::{AppSettings, ConnectionStrings, Setting, SourceStack};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Default, Setting)]
enum EnumValues {
    #[default]
    Value1 = 1,
    Value2 = 2,
}

/// Settings required for the running of this application.
#[derive(Debug, Default, AppSettings)]
#[app_setting]
struct Settings {
    #[app_setting(key = "StringSetting")]
    pub string_setting: String,
    #[app_setting(key = "StringSettingOverride")]
    pub overridden_setting: String,
    #[app_setting(key = "IntSetting")]
    pub int_setting: i32,
    #[app_setting(key = "UintSetting")]
    pub uint_setting: u32,
    #[app_setting(key = "DateTimeSetting")]
    pub date_time_setting: DateTime<Utc>,
    #[app_setting(key = "GuidSetting")]
    pub guid_setting: Uuid,
    #[app_setting(key = "FloatSetting")]
    pub float_setting: f32,
    #[app_setting(key = "DecimalSetting")]
    pub decimal_setting: Decimal,
    #[app_setting(key = "EnumSetting")]
    pub enum_setting: EnumValues,
    #[app_setting(key = "EnumSettingInt")]
    pub enum_setting_int: EnumValues,
    #[app_setting(connection_string)]
    pub connection_strings: ConnectionStrings,
}

fn main() -> Result<(), app_settings::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // file defaults -> SAMPLE__* environment overrides
    let source = SourceStack::builder()
        .with_file("demos/settings.toml", true)
        .with_env("SAMPLE", "__")
        .build()?;

    let mut settings = Settings::default();
    let report = app_settings::load(&source, &mut settings)?;

    println!("{settings:#?}");
    println!("loaded {} settings, {} missing", report.loaded.len(), report.missing.len());

    Ok(())
}
