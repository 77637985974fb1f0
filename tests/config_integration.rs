//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::path::PathBuf;

use solar_system::config::{AppConfig, RenderVariant};
use serial_test::serial;

fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("solar_system_config_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SOLAR_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SOLAR_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_selects_variant_and_step() {
    std::env::set_var("SOLAR_RENDERING__VARIANT", "textured");
    std::env::set_var("SOLAR_ANIMATION__TIME_STEP_HOURS", "6.5");
    let config = AppConfig::load();
    std::env::remove_var("SOLAR_RENDERING__VARIANT");
    std::env::remove_var("SOLAR_ANIMATION__TIME_STEP_HOURS");

    let config = config.unwrap();
    assert_eq!(config.rendering.variant, RenderVariant::Textured);
    assert_eq!(config.animation.time_step_hours, 6.5);
}

#[test]
#[serial]
fn test_shipped_defaults_match_code_defaults() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");
    assert!(dir.join("default.toml").exists());

    let config = AppConfig::load_from(&dir).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.window.width, defaults.window.width);
    assert_eq!(config.window.height, defaults.window.height);
    assert_eq!(config.camera.distance, defaults.camera.distance);
    assert_eq!(config.camera.far, defaults.camera.far);
    assert_eq!(config.animation.time_step_hours, defaults.animation.time_step_hours);
    assert_eq!(config.system.path, defaults.system.path);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = temp_config_dir("user_override");
    std::fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Base\"\nwidth = 800\n",
    )
    .unwrap();
    std::fs::write(dir.join("user.toml"), "[window]\ntitle = \"Mine\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(config.window.title, "Mine");
    assert_eq!(config.window.width, 800);
    // Missing keys fall back to defaults
    assert_eq!(config.window.height, 360);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.window.title, "Systeme Solaire");
    assert_eq!(config.rendering.variant, RenderVariant::Wireframe);
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    let dir = temp_config_dir("bad_value");
    std::fs::write(dir.join("default.toml"), "[rendering]\nvariant = \"holographic\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    std::fs::remove_dir_all(&dir).ok();

    let err = result.unwrap_err();
    assert!(format!("{}", err).starts_with("Configuration error:"));
}
