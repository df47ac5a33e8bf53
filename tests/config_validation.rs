//! Integration tests for configuration validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tracing::Level;
use versioned_protocol::config::{CodecConfig, CodecSettings, LoggingConfig, MAX_PACKET_SIZE};
use versioned_protocol::error::ProtocolError;

#[test]
fn test_default_config_validates() {
    let config = CodecConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_zero_packet_size_rejected() {
    let config = CodecConfig::default_with_overrides(|c| c.codec.max_packet_size = 0);
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be 0")));
}

#[test]
fn test_packet_size_above_protocol_maximum() {
    let settings = CodecSettings {
        max_packet_size: MAX_PACKET_SIZE + 1,
        ..CodecSettings::default()
    };
    assert_eq!(settings.validate().len(), 1);
}

#[test]
fn test_file_logging_requires_path() {
    let logging = LoggingConfig {
        log_to_file: true,
        log_file_path: None,
        ..LoggingConfig::default()
    };
    let errors = logging.validate();
    assert!(errors.iter().any(|e| e.contains("log_file_path")));
}

#[test]
fn test_no_log_output_rejected() {
    let logging = LoggingConfig {
        log_to_console: false,
        ..LoggingConfig::default()
    };
    assert!(!logging.validate().is_empty());
}

#[test]
fn test_app_name_limits() {
    let mut logging = LoggingConfig {
        app_name: String::new(),
        ..LoggingConfig::default()
    };
    assert!(!logging.validate().is_empty());
    logging.app_name = "x".repeat(65);
    assert!(logging.validate()[0].contains("too long"));
}

#[test]
fn test_validate_strict_lists_every_problem() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.codec.max_packet_size = 0;
        c.logging.app_name.clear();
    });
    match config.validate_strict() {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("Max packet size"));
            assert!(msg.contains("Application name"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codec.toml");

    let config = CodecConfig::default_with_overrides(|c| {
        c.codec.strict_frames = false;
        c.codec.max_packet_size = 65_536;
        c.logging.log_level = Level::DEBUG;
        c.logging.json_format = true;
    });
    config.save_to_file(&path).unwrap();

    let loaded = CodecConfig::from_file(&path).unwrap();
    assert!(!loaded.codec.strict_frames);
    assert_eq!(loaded.codec.max_packet_size, 65_536);
    assert_eq!(loaded.logging.log_level, Level::DEBUG);
    assert!(loaded.logging.json_format);
}

#[test]
fn test_invalid_log_level_rejected() {
    let err = CodecConfig::from_toml(
        r#"
[logging]
app_name = "x"
log_level = "loud"
log_to_console = true
log_to_file = false
json_format = false
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        CodecConfig::from_file("/nonexistent/codec.toml"),
        Err(ProtocolError::ConfigError(_))
    ));
}

#[test]
fn test_from_env_overrides() {
    std::env::set_var("VERSIONED_PROTOCOL_STRICT_FRAMES", "false");
    std::env::set_var("VERSIONED_PROTOCOL_MAX_PACKET_SIZE", "1024");
    std::env::set_var("VERSIONED_PROTOCOL_LOG_LEVEL", "warn");
    let config = CodecConfig::from_env().unwrap();
    std::env::remove_var("VERSIONED_PROTOCOL_STRICT_FRAMES");
    std::env::remove_var("VERSIONED_PROTOCOL_MAX_PACKET_SIZE");
    std::env::remove_var("VERSIONED_PROTOCOL_LOG_LEVEL");

    assert!(!config.codec.strict_frames);
    assert_eq!(config.codec.max_packet_size, 1024);
    assert_eq!(config.logging.log_level, Level::WARN);
}
