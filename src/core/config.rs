//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.framelog/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::scroll::DEFAULT_PAGE_SIZE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FramelogConfig {
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InterfaceConfig {
    pub sender_width: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TickerConfig {
    pub interval_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SENDER_WIDTH: usize = 0;
pub const DEFAULT_LOG_FILE: &str = "framelog.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub sender_width: usize,
    pub page_size: usize,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub tick_interval_ms: u64,
    /// Values that were rejected during resolution. Resolution runs before
    /// the logger exists, so the caller logs these once it is up.
    pub warnings: Vec<String>,
}

/// Values supplied on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub sender_width: Option<usize>,
    pub log_level: Option<String>,
    pub tick_interval_ms: Option<u64>,
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

/// Returns the path to `~/.framelog/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".framelog").join("config.toml"))
}

/// Load config from `~/.framelog/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FramelogConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FramelogConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FramelogConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FramelogConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<FramelogConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FramelogConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# framelog configuration
# All settings are optional; defaults fill in anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [interface]
# sender_width = 0         # 0 hides the sender column
# page_size = 10           # messages moved per PageUp/PageDown

# [logging]
# level = "info"           # "off", "error", "warn", "info", "debug", "trace"
# file = "framelog.log"

# [ticker]
# interval_ms = 1000
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FramelogConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &FramelogConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    let sender_width = cli
        .sender_width
        .or_else(|| parse_env(&env, "FRAMELOG_SENDER_WIDTH", &mut warnings))
        .or(config.interface.sender_width)
        .unwrap_or(DEFAULT_SENDER_WIDTH);

    // Page size must be positive
    let page_size = parse_env(&env, "FRAMELOG_PAGE_SIZE", &mut warnings)
        .or(config.interface.page_size)
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("FRAMELOG_LOG_LEVEL"))
        .or_else(|| config.logging.level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warnings.push(format!("Unknown log level '{level}', using {DEFAULT_LOG_LEVEL}"));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = env("FRAMELOG_LOG_FILE")
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
        .into();

    let tick_interval_ms = cli
        .tick_interval_ms
        .or_else(|| parse_env(&env, "FRAMELOG_TICK_MS", &mut warnings))
        .or(config.ticker.interval_ms)
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS);

    ResolvedConfig {
        sender_width,
        page_size,
        log_level,
        log_file,
        tick_interval_ms,
        warnings,
    }
}

fn parse_env<F, T>(env: &F, key: &str, warnings: &mut Vec<String>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring {key}={raw:?}: not a valid number"));
            None
        }
    }
}
