//! Config loading and resolution through the public API.

use std::fs;
use std::time::Duration;

use objscope::core::config::{self, ConfigError, DEFAULT_PAGER_MAX_LEN};
use objscope::core::explorer::Explorer;
use objscope::object::{Record, value};
use serde_json::json;

#[test]
fn test_file_values_flow_into_display_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[display]\nrepr_max_len = 8\nerror_flash_ms = 5\n\n[log]\nfile = \"custom.log\"\n",
    )
    .unwrap();

    let loaded = config::load_config_from(&path).unwrap();
    let resolved = config::resolve(&loaded, Some("debug"));
    assert_eq!(resolved.limits.preview.max_len, 8);
    assert_eq!(resolved.limits.pager.max_len, DEFAULT_PAGER_MAX_LEN);
    assert_eq!(resolved.error_flash, Duration::from_millis(5));
    assert_eq!(resolved.log_level, "debug");

    // The preview bound applies to what the explorer renders.
    let root = Record::new("Holder")
        .attr("long", value(json!("abcdefghijklmnopqrstuvwxyz")))
        .into_ref();
    let explorer = Explorer::new(root, "root", resolved.limits);
    let repr = explorer.selected_object().unwrap().repr();
    assert!(repr.truncated);
    assert!(repr.text.ends_with('…'), "{}", repr.text);
    assert!(explorer.selected_object().unwrap().full_repr().text.contains("xyz"));
}

#[test]
fn test_first_run_writes_a_commented_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".objscope").join("config.toml");
    let loaded = config::load_config_from(&path).unwrap();
    assert!(loaded.display.repr_max_len.is_none());
    assert!(path.exists());
    // Every line of the generated file is a comment or blank.
    let written = fs::read_to_string(&path).unwrap();
    assert!(
        written
            .lines()
            .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    );
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "display = [").unwrap();
    let err = config::load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("config parse error"));
}
