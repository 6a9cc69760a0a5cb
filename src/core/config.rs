//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.objscope/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::cached::DisplayLimits;
use crate::object::ReprLimits;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ObjscopeConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub repr_max_len: Option<usize>,
    pub repr_max_depth: Option<usize>,
    pub pager_max_len: Option<usize>,
    pub error_flash_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPR_MAX_LEN: usize = 512;
pub const DEFAULT_REPR_MAX_DEPTH: usize = 6;
pub const DEFAULT_PAGER_MAX_LEN: usize = 65_536;
pub const DEFAULT_PAGER_MAX_DEPTH: usize = 32;
pub const DEFAULT_ERROR_FLASH_MS: u64 = 250;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "objscope.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub limits: DisplayLimits,
    pub error_flash: Duration,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ObjscopeConfig::default(), None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.objscope/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".objscope").join("config.toml"))
}

/// Load config from `~/.objscope/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ObjscopeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ObjscopeConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ObjscopeConfig::default());
    };
    load_config_from(&path)
}

/// Same as [`load_config`], for an explicit path.
pub fn load_config_from(path: &Path) -> Result<ObjscopeConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ObjscopeConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: ObjscopeConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# objscope configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [display]
# repr_max_len = 512          # characters before a preview is cut off with "…"
# repr_max_depth = 6          # nesting before children are shown as "..."
# pager_max_len = 65536       # characters shown by the full-screen pager
# error_flash_ms = 250        # how long the border stays red after an error

# [log]
# level = "info"              # "error", "warn", "info", "debug", "trace", "off"
# file = "objscope.log"       # or set OBJSCOPE_LOG_FILE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_log_level` comes from the `--log-level` flag (None = not specified).
pub fn resolve(config: &ObjscopeConfig, cli_log_level: Option<&str>) -> ResolvedConfig {
    let display = &config.display;

    let limits = DisplayLimits {
        preview: ReprLimits {
            max_len: display.repr_max_len.unwrap_or(DEFAULT_REPR_MAX_LEN).max(1),
            max_depth: display.repr_max_depth.unwrap_or(DEFAULT_REPR_MAX_DEPTH),
        },
        pager: ReprLimits {
            max_len: display.pager_max_len.unwrap_or(DEFAULT_PAGER_MAX_LEN).max(1),
            max_depth: DEFAULT_PAGER_MAX_DEPTH,
        },
    };

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("OBJSCOPE_LOG_LEVEL").ok())
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    // Log file: env → config → default
    let log_file = std::env::var("OBJSCOPE_LOG_FILE")
        .ok()
        .or_else(|| config.log.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        limits,
        error_flash: Duration::from_millis(
            display.error_flash_ms.unwrap_or(DEFAULT_ERROR_FLASH_MS),
        ),
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ObjscopeConfig::default();
        assert!(config.display.repr_max_len.is_none());
        assert!(config.log.level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&ObjscopeConfig::default(), Some("warn"));
        assert_eq!(resolved.limits.preview.max_len, DEFAULT_REPR_MAX_LEN);
        assert_eq!(resolved.limits.preview.max_depth, DEFAULT_REPR_MAX_DEPTH);
        assert_eq!(resolved.limits.pager.max_len, DEFAULT_PAGER_MAX_LEN);
        assert_eq!(resolved.error_flash, Duration::from_millis(250));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ObjscopeConfig {
            display: DisplayConfig {
                repr_max_len: Some(80),
                repr_max_depth: Some(2),
                pager_max_len: Some(1000),
                error_flash_ms: Some(10),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.limits.preview, ReprLimits { max_len: 80, max_depth: 2 });
        assert_eq!(resolved.limits.pager.max_len, 1000);
        assert_eq!(resolved.error_flash, Duration::from_millis(10));
    }

    #[test]
    fn test_resolve_cli_log_level_wins() {
        let config = ObjscopeConfig {
            log: LogConfig {
                level: Some("trace".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("error"));
        assert_eq!(resolved.log_level, "error");
    }

    #[test]
    fn test_zero_lengths_are_bumped() {
        let config = ObjscopeConfig {
            display: DisplayConfig {
                repr_max_len: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config, None).limits.preview.max_len, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[display]
repr_max_depth = 3
"#;
        let config: ObjscopeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.repr_max_depth, Some(3));
        assert!(config.display.repr_max_len.is_none());
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.display.repr_max_len.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [display]"));
        // The generated file must itself parse to an empty config.
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.log.level.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\nrepr_max_len = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_full_toml_round_trip() {
        let toml_str = r#"
[display]
repr_max_len = 100
error_flash_ms = 0

[log]
level = "debug"
file = "/tmp/objscope.log"
"#;
        let config: ObjscopeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.repr_max_len, Some(100));
        assert_eq!(config.display.error_flash_ms, Some(0));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log.file.as_deref(), Some("/tmp/objscope.log"));
    }
}
