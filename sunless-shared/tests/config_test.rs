use serde::Deserialize;
use sunless_shared::config;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Window {
    width: u32,
    height: u32,
}

// The store is process-wide, so everything that touches it lives in one test.
#[test]
fn sections_fall_back_to_defaults() {
    let before: Window = config::get("window");
    assert_eq!(before, Window::default());
    assert!(!config::is_initialized());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nwidth = 800\n\n[broken]\nwidth = \"wide\"\n").unwrap();
    config::init(&path).unwrap();

    let window: Window = config::get("window");
    assert_eq!(window, Window { width: 800, height: 0 });

    let broken: Window = config::get("broken");
    assert_eq!(broken, Window::default());

    let missing: Window = config::get("nope");
    assert_eq!(missing, Window::default());

    assert!(config::init(&path).is_err());

    let mut table = toml::Table::new();
    table.insert("width".into(), toml::Value::Integer(640));
    table.insert("height".into(), toml::Value::Integer(480));
    config::set("window", toml::Value::Table(table)).unwrap();
    let window: Window = config::get("window");
    assert_eq!(window, Window { width: 640, height: 480 });
}
