//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use gfx_demos::config::AppConfig;
use serial_test::serial;

fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gfx_config_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("GFX_OUTPUT__WIDTH", "123");
    std::env::set_var("GFX_TERRAIN__SHINY", "true");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("GFX_OUTPUT__WIDTH");
    std::env::remove_var("GFX_TERRAIN__SHINY");

    assert_eq!(config.output.width, 123);
    assert!(config.terrain.shiny);
    // untouched keys still come from config/default.toml
    assert_eq!(config.output.height, 400);
}

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    let from_file = AppConfig::load().unwrap();
    let defaults = AppConfig::default();

    assert_eq!(from_file.burst.to_burst_config(), defaults.burst.to_burst_config());
    assert_eq!(from_file.terrain.to_terrain_params(), defaults.terrain.to_terrain_params());
    assert_eq!(from_file.flight.script, defaults.flight.script);
    assert_eq!(from_file.logo.velocities, defaults.logo.velocities);
    assert_eq!(from_file.debug.log_level, "info");
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = temp_config_dir("user");
    fs::write(dir.join("default.toml"), "[output]\nframes = 30\nsave_every = 5\n").unwrap();
    fs::write(dir.join("user.toml"), "[output]\nframes = 7\n\n[debug]\nseed = 99\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.output.frames, 7);
    assert_eq!(config.output.save_every, 5);
    assert_eq!(config.debug.seed, Some(99));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.output.frames, AppConfig::default().output.frames);
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    let dir = temp_config_dir("bad");
    fs::write(dir.join("default.toml"), "[output]\nwidth = \"wide\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));

    fs::remove_dir_all(&dir).unwrap();
}
