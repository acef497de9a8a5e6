//! Configuration tests
//!
//! Precedence and file-format checks. Environment lookups are injected so the
//! tests never touch the real process environment.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_key: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.data_dir, config.data_dir);
    assert_eq!(resolved.allowed_extensions, config.allowed_extensions);
    assert_eq!(resolved.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_config_roundtrip_with_content_path() {
    let config = Config {
        content_path: Some(PathBuf::from("./docs/welcome.md")),
        ..Config::default()
    };

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(parsed.content_path.as_deref(), Some("./docs/welcome.md"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_builtin_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env);
    assert_eq!(config.data_dir, PathBuf::from("./data/"));
    assert_eq!(config.embed_url, "http://localhost:8000/embed");
    assert_eq!(config.error_timeout(), Duration::from_secs(2));
    assert_eq!(
        config.allowed_extensions,
        vec![".mod", ".sum", ".go", ".txt", ".md"]
    );
    assert!(config.embed_on_startup);
    assert!(config.content_path.is_none());
}

#[test]
fn test_file_values_override_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
        data_dir = "/srv/rfcs"
        allowed_extensions = [".txt"]
        error_timeout_ms = 3500
        embed_on_startup = false

        [logging]
        level = "debug"
        file_rotation = "hourly"
        "#,
    )
    .unwrap();

    let config = Config::resolve(file, no_env);
    assert_eq!(config.data_dir, PathBuf::from("/srv/rfcs"));
    assert_eq!(config.allowed_extensions, vec![".txt"]);
    assert_eq!(config.error_timeout(), Duration::from_millis(3500));
    assert!(!config.embed_on_startup);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
    // Untouched keys keep their defaults
    assert_eq!(config.embed_url, "http://localhost:8000/embed");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
        data_dir = "/srv/rfcs"
        embed_url = "http://file:1/embed"
        "#,
    )
    .unwrap();

    let env = env_from(&[
        ("DOCSCOUT_DATA_DIR", "/tmp/docs"),
        ("DOCSCOUT_THEME", "nord"),
    ]);
    let config = Config::resolve(file, env);

    assert_eq!(config.data_dir, PathBuf::from("/tmp/docs"));
    assert_eq!(config.embed_url, "http://file:1/embed");
    assert_eq!(config.theme, "nord");
}

#[test]
fn test_flags_override_everything() {
    let env = env_from(&[("DOCSCOUT_EMBED_URL", "http://env:2/embed")]);
    let mut config = Config::resolve(FileConfig::default(), env);

    config.apply_overrides(&ConfigOverrides {
        embed_url: Some("http://flag:3/embed".to_string()),
        data_dir: Some(PathBuf::from("./corpus")),
        no_embed: true,
        ..ConfigOverrides::default()
    });

    assert_eq!(config.embed_url, "http://flag:3/embed");
    assert_eq!(config.data_dir, PathBuf::from("./corpus"));
    assert!(!config.embed_on_startup);
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
}

// ─────────────────────────────────────────────────────────────────────────────
// File loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let overrides = ConfigOverrides {
        config_path: Some(dir.path().join("absent.toml")),
        ..ConfigOverrides::default()
    };
    assert!(Config::load(&overrides).is_err());
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "data_dir = [not valid").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_load_content_prefers_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intro.md");
    std::fs::write(&path, "# Intro\n").unwrap();

    let config = Config {
        content_path: Some(path),
        ..Config::default()
    };
    assert_eq!(config.load_content().unwrap(), "# Intro\n");

    let builtin = Config::default().load_content().unwrap();
    assert_eq!(builtin, DEFAULT_CONTENT);
}

#[test]
fn test_unreadable_content_is_an_error() {
    let config = Config {
        content_path: Some(PathBuf::from("/definitely/not/here.md")),
        ..Config::default()
    };
    assert!(config.load_content().is_err());
}

#[test]
fn test_error_timeout_is_clamped_to_two_seconds() {
    for configured in [0, 500, 1999] {
        let file = FileConfig {
            error_timeout_ms: Some(configured),
            ..FileConfig::default()
        };
        let config = Config::resolve(file, no_env);
        assert_eq!(config.error_timeout(), Duration::from_secs(2));
    }
}
