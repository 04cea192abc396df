use std::io::Write;

use teams_card_sink::sink::{ConfigError, SinkOptions};
use teams_card_sink::{CardSink, Level, SinkError};
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let options = SinkOptions::new("https://example.com/hook");

    assert_eq!(options.webhook_url, "https://example.com/hook");
    assert_eq!(options.minimum_level, Level::Verbose);
    assert_eq!(options.batch_size, 100);
    assert_eq!(options.flush_interval_ms, 2000);
    assert_eq!(options.proxy_url, None);
    assert_eq!(options.title, "Log Event");
    assert!(!options.omit_properties_section);
}

#[test]
fn test_invalid_webhook_url_fails_validation() {
    let options = SinkOptions::new("not a url");
    assert!(matches!(options.validate(), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn test_zero_batch_size_fails_validation() {
    let options = SinkOptions {
        batch_size: 0,
        ..SinkOptions::new("https://example.com/hook")
    };
    assert!(matches!(
        options.validate(),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_zero_flush_interval_fails_validation() {
    let options = SinkOptions {
        flush_interval_ms: 0,
        ..SinkOptions::new("https://example.com/hook")
    };
    assert!(matches!(
        options.validate(),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_invalid_proxy_url_fails_validation() {
    let options = SinkOptions {
        proxy_url: Some("::bad::".to_string()),
        ..SinkOptions::new("https://example.com/hook")
    };
    assert!(matches!(options.validate(), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn test_blank_proxy_url_counts_as_absent() {
    let options = SinkOptions {
        proxy_url: Some("   ".to_string()),
        ..SinkOptions::new("https://example.com/hook")
    };
    assert!(options.validate().is_ok());
}

#[test]
fn test_from_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
webhook_url = "https://example.com/hook"
minimum_level = "warning"
batch_size = 25
flush_interval_ms = 500
title = "Production alerts"
omit_properties_section = true
"#
    )
    .unwrap();

    let options = SinkOptions::from_file(file.path()).unwrap();

    assert_eq!(options.webhook_url, "https://example.com/hook");
    assert_eq!(options.minimum_level, Level::Warning);
    assert_eq!(options.batch_size, 25);
    assert_eq!(options.flush_interval_ms, 500);
    assert_eq!(options.flush_interval, std::time::Duration::from_millis(500));
    assert_eq!(options.title, "Production alerts");
    assert!(options.omit_properties_section);
}

#[test]
fn test_from_file_fills_missing_fields_with_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "webhook_url = \"https://example.com/hook\"\n").unwrap();

    let options = SinkOptions::from_file(file.path()).unwrap();

    assert_eq!(options.minimum_level, Level::Verbose);
    assert_eq!(options.batch_size, 100);
}

#[test]
fn test_from_file_rejects_invalid_config() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "webhook_url = \"https://example.com/hook\"\nbatch_size = 0\n").unwrap();

    assert!(matches!(
        SinkOptions::from_file(file.path()),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_sink_construction_rejects_missing_webhook_url() {
    let result = CardSink::new(SinkOptions::default());
    assert!(matches!(result, Err(SinkError::Config(_))));
}
