use plotpick::config::{AppConfig, ConfigManager, Theme, CONFIG_FILE};
use ratatui::style::Color;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a temporary config directory for testing
fn setup_test_config_dir() -> (TempDir, ConfigManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
    (temp_dir, config_manager)
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.version, "0.1");
    assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.server.catalog_path, "/data_visualization/visualize/");
    assert_eq!(
        config.server.generate_path,
        "/data_visualization/generate_graph"
    );
    assert_eq!(config.server.timeout_secs, None);
    assert_eq!(config.export.image_dir, None);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.theme.colors.list_selected, "reversed");
    assert!(!config.debug.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_without_user_file_is_default() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let config = AppConfig::load_with(&config_manager).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_write_default_config_refuses_overwrite() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let path = config_manager.write_default_config(false).unwrap();
    assert_eq!(path, config_manager.config_path(CONFIG_FILE));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# [server]"));
    assert!(content.contains("# [theme.colors]"));

    let err = config_manager.write_default_config(false).unwrap_err();
    assert!(err.to_string().contains("--force"));

    fs::write(&path, "garbage").unwrap();
    config_manager.write_default_config(true).unwrap();
    assert_ne!(fs::read_to_string(&path).unwrap(), "garbage");
}

#[test]
fn test_generated_template_loads_as_default() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    config_manager.write_default_config(false).unwrap();

    // Everything is commented out, so loading it changes nothing
    let config = AppConfig::load_with(&config_manager).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_user_config_merges_over_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    config_manager.ensure_config_dir().unwrap();
    fs::write(
        config_manager.config_path(CONFIG_FILE),
        r##"
[server]
base_url = "https://charts.example.com"
timeout_secs = 30

[export]
image_dir = "/tmp/charts"

[theme.colors]
chart_title = "#00ff00"
"##,
    )
    .unwrap();

    let config = AppConfig::load_with(&config_manager).unwrap();
    assert_eq!(config.server.base_url, "https://charts.example.com");
    assert_eq!(config.server.timeout_secs, Some(30));
    // untouched fields keep their defaults
    assert_eq!(config.server.catalog_path, "/data_visualization/visualize/");
    assert_eq!(config.export.image_dir, Some(PathBuf::from("/tmp/charts")));
    assert_eq!(config.theme.colors.chart_title, "#00ff00");
    assert_eq!(config.theme.colors.error, "red");
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("[server]\nbase_url = \"ftp://example.com\"\n", "base_url"),
        ("[server]\ntimeout_secs = 0\n", "timeout_secs"),
        ("[theme.colors]\nerror = \"not-a-color\"\n", "theme.colors.error"),
        ("version = \"9.0\"\n", "Unsupported config version"),
    ];
    for (content, expected) in cases {
        let (_temp_dir, config_manager) = setup_test_config_dir();
        config_manager.ensure_config_dir().unwrap();
        let path = config_manager.config_path(CONFIG_FILE);
        fs::write(path, content).unwrap();

        let err = AppConfig::load_with(&config_manager).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{}' in: {}",
            expected,
            err
        );
    }
}

#[test]
fn test_malformed_toml_reports_path() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    config_manager.ensure_config_dir().unwrap();
    fs::write(config_manager.config_path(CONFIG_FILE), "[server\n").unwrap();

    let err = AppConfig::load_with(&config_manager).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_theme_from_default_config() {
    let theme = Theme::from_config(&AppConfig::default().theme).unwrap();
    assert_eq!(theme.get("list_selected"), Color::Reset);
    assert!(theme.get_optional("chart_title").is_some());
    assert!(theme.get_optional("no_such_color").is_none());
}
