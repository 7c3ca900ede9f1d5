//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.reelpick/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::suggest::DEFAULT_MAX_SUGGESTIONS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReelpickConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub max_suggestions: Option<usize>,
    pub catalog_failure_alert: Option<bool>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Values given on the command line. `None` / `false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub alert_on_catalog_failure: bool,
    pub log_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "reelpick.log";
pub const BACKEND_URL_ENV: &str = "REELPICK_BACKEND_URL";
/// Taller dropdowns would push the results off most terminals.
pub const MAX_SUGGESTIONS_LIMIT: usize = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub request_timeout: Option<Duration>,
    pub max_suggestions: usize,
    pub catalog_failure_alert: bool,
    pub log_file: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.reelpick/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".reelpick").join("config.toml"))
}

/// Load config from `~/.reelpick/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ReelpickConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ReelpickConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ReelpickConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ReelpickConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ReelpickConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ReelpickConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Reelpick Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# max_suggestions = 5                # Type-ahead entries under the search box (1-20)
# catalog_failure_alert = false      # Show a popup when the movie list can't be loaded
# log_file = "reelpick.log"

# [backend]
# base_url = "http://localhost:5000" # Or set REELPICK_BACKEND_URL
# request_timeout_secs = 30          # Unset = wait for the server
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
pub fn resolve(config: &ReelpickConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env(
    config: &ReelpickConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| env(BACKEND_URL_ENV))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let max_suggestions = match config.general.max_suggestions {
        Some(0) => {
            warn!("max_suggestions = 0 would hide every suggestion, using default");
            DEFAULT_MAX_SUGGESTIONS
        }
        Some(n) if n > MAX_SUGGESTIONS_LIMIT => {
            warn!(
                "max_suggestions = {} is too large, capping at {}",
                n, MAX_SUGGESTIONS_LIMIT
            );
            MAX_SUGGESTIONS_LIMIT
        }
        Some(n) => n,
        None => DEFAULT_MAX_SUGGESTIONS,
    };

    // The flag can only switch the alert on; the file decides otherwise.
    let catalog_failure_alert =
        cli.alert_on_catalog_failure || config.general.catalog_failure_alert.unwrap_or(false);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        backend_url,
        request_timeout: config
            .backend
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        max_suggestions,
        catalog_failure_alert,
        log_file,
    }
}
