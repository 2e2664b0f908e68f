//! End-to-end loads through the derive macros.

use std::collections::HashMap;

use app_settings::{
    discover, load, AppSettings, ConnectionStrings, ConvertError, FieldError, FileSource,
    MapSource, SourceError,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq, AppSettings)]
#[app_setting]
struct Service {
    pub name: String,
    pub port: i32,
}

#[derive(Debug, Default, PartialEq, AppSettings)]
struct Cherry {
    pub ignored: String,
    #[app_setting]
    pub picked: String,
    #[app_setting(key = "Renamed")]
    pub original: u32,
    private: u8,
}

#[derive(Debug, Default, AppSettings)]
struct Connections {
    #[app_setting(connection_string)]
    pub conn: ConnectionStrings,
}

#[derive(Debug, Default, AppSettings)]
#[app_setting]
struct WrongShape {
    #[app_setting(connection_string)]
    pub conn: HashMap<String, String>,
    #[app_setting(connection_string)]
    pub timeout: u64,
}

#[derive(Debug, Default, AppSettings)]
#[app_setting]
struct Locked {
    pub name: String,
    #[app_setting(read_only)]
    pub build: String,
}

#[derive(Debug, Default, AppSettings)]
struct Nothing {
    pub name: String,
}

#[test]
fn test_scenario_a_all_values_convert() {
    let source = MapSource::new()
        .with_setting("name", "svc")
        .with_setting("port", "8080");
    let mut target = Service::default();

    let report = load(&source, &mut target).unwrap();

    assert_eq!(
        target,
        Service {
            name: "svc".into(),
            port: 8080
        }
    );
    assert_eq!(report.loaded, vec!["name", "port"]);
}

#[test]
fn test_scenario_b_bad_value_is_reported_by_key() {
    let source = MapSource::new()
        .with_setting("name", "svc")
        .with_setting("port", "notanumber");
    let mut target = Service::default();

    let error = load(&source, &mut target).unwrap_err();

    assert_eq!(error.len(), 1);
    assert_eq!(error.keys().collect::<Vec<_>>(), vec!["port"]);
    assert!(matches!(
        &error.failures()[0],
        FieldError::Convert {
            source: ConvertError::Invalid { .. },
            ..
        }
    ));
    assert_eq!(target.name, "svc");
    assert_eq!(target.port, 0);
    assert!(error.to_string().starts_with("1 errors loading settings"));
}

#[test]
fn test_scenario_c_connection_strings_are_copied_verbatim() {
    let source = MapSource::new()
        .with_connection_string("db", "host=a")
        .with_setting("conn", "should not be read");
    let mut target = Connections::default();

    load(&source, &mut target).unwrap();

    let expected: ConnectionStrings = [("db", "host=a")].into_iter().collect();
    assert_eq!(target.conn, expected);
}

#[test]
fn test_scenario_d_empty_value_leaves_field_untouched() {
    let source = MapSource::new()
        .with_setting("name", "")
        .with_setting("port", "8080");
    let mut target = Service {
        name: "before".into(),
        port: 1,
    };

    let report = load(&source, &mut target).unwrap();

    assert_eq!(target.name, "before");
    assert_eq!(target.port, 8080);
    assert_eq!(report.missing, vec!["name"]);
}

#[test]
fn test_missing_keys_contribute_no_failures() {
    let source = MapSource::new();
    let mut target = Service {
        name: "keep".into(),
        port: 42,
    };

    let report = load(&source, &mut target).unwrap();

    assert_eq!(target.port, 42);
    assert_eq!(report.missing, vec!["name", "port"]);
}

#[test]
fn test_field_markers_select_fields_on_unmarked_struct() {
    let keys: Vec<_> = discover::<Cherry>()
        .iter()
        .map(|field| (field.member_name, field.external_key))
        .collect();

    assert_eq!(keys, vec![("picked", "picked"), ("original", "Renamed")]);

    let source = MapSource::new()
        .with_setting("ignored", "nope")
        .with_setting("picked", "yes")
        .with_setting("original", "1")
        .with_setting("Renamed", "2")
        .with_setting("private", "3");
    let mut target = Cherry::default();

    load(&source, &mut target).unwrap();

    assert_eq!(
        target,
        Cherry {
            ignored: String::new(),
            picked: "yes".into(),
            original: 2,
            private: 0,
        }
    );
}

#[test]
fn test_every_failure_is_counted_and_tagged() {
    #[derive(Debug, Default, AppSettings)]
    #[app_setting]
    struct Many {
        pub a: u8,
        pub b: bool,
        pub c: String,
        pub d: f64,
    }

    let source = MapSource::new()
        .with_setting("a", "256")
        .with_setting("b", "maybe")
        .with_setting("c", "fine")
        .with_setting("d", "1.5.3");
    let mut target = Many::default();

    let error = load(&source, &mut target).unwrap_err();

    assert_eq!(error.len(), 3);
    assert_eq!(error.keys().collect::<Vec<_>>(), vec!["a", "b", "d"]);
    assert_eq!(target.c, "fine");
    assert_eq!(
        error.to_string(),
        "3 errors loading settings: a, b, d"
    );
}

#[test]
fn test_connection_string_marker_on_wrong_type_fails_conversion() {
    let source = MapSource::new()
        .with_connection_string("db", "host=a")
        .with_setting("conn", "db=host=a")
        .with_setting("timeout", "30");
    let mut target = WrongShape::default();

    let error = load(&source, &mut target).unwrap_err();

    assert_eq!(error.keys().collect::<Vec<_>>(), vec!["conn", "timeout"]);
    assert!(matches!(
        &error.failures()[0],
        FieldError::Convert {
            source: ConvertError::Unsupported { .. },
            ..
        }
    ));
    assert!(matches!(
        &error.failures()[1],
        FieldError::Convert {
            source: ConvertError::Mismatch { .. },
            ..
        }
    ));
    assert!(target.conn.is_empty());
    assert_eq!(target.timeout, 0);
}

#[test]
fn test_connection_string_marker_on_wrong_type_without_value_is_missing() {
    let source = MapSource::new().with_connection_string("db", "host=a");
    let mut target = WrongShape {
        timeout: 30,
        ..WrongShape::default()
    };

    let report = load(&source, &mut target).unwrap();

    assert_eq!(report.missing, vec!["conn", "timeout"]);
    assert_eq!(target.timeout, 30);
}

#[test]
fn test_failing_connection_strings_do_not_stop_the_load() {
    #[derive(Debug, Default, AppSettings)]
    #[app_setting]
    struct Wired {
        #[app_setting(connection_string, key = "Connections")]
        pub conn: ConnectionStrings,
        pub name: String,
    }

    let source = FileSource::parse(
        r#"
[settings]
name = "svc"

[connection_strings]
db = 5
"#,
    )
    .unwrap();
    let mut target = Wired::default();

    let error = load(&source, &mut target).unwrap_err();

    assert_eq!(error.len(), 1);
    assert!(matches!(
        &error.failures()[0],
        FieldError::Fetch {
            key,
            source: SourceError::NonStringConnection(name),
        } if key == "Connections" && name == "db"
    ));
    assert!(target.conn.is_empty());
    assert_eq!(target.name, "svc");
}

#[test]
fn test_read_only_fields_are_skipped() {
    let source = MapSource::new()
        .with_setting("name", "svc")
        .with_setting("build", "42");
    let mut target = Locked::default();

    let report = load(&source, &mut target).unwrap();

    assert_eq!(target.name, "svc");
    assert!(target.build.is_empty());
    assert_eq!(report.read_only, vec!["build"]);
}

#[test]
fn test_no_eligible_fields_is_a_success() {
    let source = MapSource::new().with_setting("name", "svc");
    let mut target = Nothing::default();

    let report = load(&source, &mut target).unwrap();

    assert!(discover::<Nothing>().is_empty());
    assert!(report.loaded.is_empty());
    assert!(target.name.is_empty());
}

#[test]
fn test_loading_twice_is_idempotent() {
    let source = MapSource::new()
        .with_setting("name", "svc")
        .with_setting("port", "8080");
    let mut once = Service::default();
    let mut twice = Service::default();

    load(&source, &mut once).unwrap();
    load(&source, &mut twice).unwrap();
    load(&source, &mut twice).unwrap();

    assert_eq!(once, twice);
}
