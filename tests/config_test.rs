use std::io::Write;

use hansik::config::{AppConfig, LogFormat, MenuSection, DEFAULT_VISION_ENDPOINT};
use hansik::menu::WeekdayCode;
use tempfile::{NamedTempFile, TempDir};

const WEEK_JSON: &str = r#"{
    "mon": {"date": "월요일", "lunch": "카레라이스", "dinner": "라면"},
    "tue": {"date": "화요일", "lunch": "b", "dinner": "b"},
    "wed": {"date": "수요일", "lunch": "c", "dinner": "c"},
    "thu": {"date": "목요일", "lunch": "d", "dinner": "d"},
    "fri": {"date": "금요일", "lunch": "e", "dinner": "e"}
}"#;

#[test]
fn defaults_apply_without_config_file() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_from(dir.path().join("missing.toml")).unwrap();

    assert_eq!(config.server.port, 8000);
    assert!(config.server.cors);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.vision.endpoint, DEFAULT_VISION_ENDPOINT);
    assert!(config.menu.path.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 9090
cors = false

[logging]
level = "debug"
format = "text"

[vision]
max_results = 10
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.server.port, 9090);
    assert!(!config.server.cors);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.vision.max_results, Some(10));
}

#[test]
fn built_in_menu_when_no_path() {
    let config = AppConfig::default();
    let table = config.menu_table().unwrap();
    assert_eq!(table.len(), 5);
}

#[test]
fn menu_table_loaded_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(WEEK_JSON.as_bytes()).unwrap();

    let config = AppConfig {
        menu: MenuSection {
            path: Some(file.path().display().to_string()),
        },
        ..Default::default()
    };

    let table = config.menu_table().unwrap();
    assert_eq!(table.get(WeekdayCode::Mon).unwrap().lunch, "카레라이스");
}

#[test]
fn incomplete_menu_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"mon": {"date": "a", "lunch": "b", "dinner": "c"}}"#)
        .unwrap();

    let config = AppConfig {
        menu: MenuSection {
            path: Some(file.path().display().to_string()),
        },
        ..Default::default()
    };

    let err = config.menu_table().unwrap_err();
    assert!(format!("{:#}", err).contains("missing weekdays"));
}
