//! Configuration loader
//!
//! Loads the embed configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the calendar id is not set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every loaded configuration goes through [`validate`].
//!
//! ## Environment Variables
//! - `CALEMBED_CALENDAR_ID`: Upstream calendar id (required for env loading)
//! - `CALEMBED_TIMEZONE`: IANA time zone name (default `UTC`)
//! - `CALEMBED_CACHE_DURATION`: Cache duration in seconds (default 300)
//! - `CALEMBED_MAX_RESULTS`: Upper limit on fetched events (default 250)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./calembed.json` or `./calembed.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use calembed_domain::{CalEmbedError, EmbedConfig, Result};
use chrono_tz::Tz;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["calembed.json", "calembed.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the calendar id is
/// missing there, falls back to a config file.
///
/// # Errors
/// Returns `CalEmbedError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<EmbedConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CALEMBED_CALENDAR_ID` is required; the remaining variables fall back to
/// their defaults.
///
/// # Errors
/// Returns `CalEmbedError::Config` if the calendar id is missing or a value
/// is invalid.
pub fn load_from_env() -> Result<EmbedConfig> {
    let defaults = EmbedConfig::default();

    let calendar_id = env_var("CALEMBED_CALENDAR_ID")?;
    let timezone = std::env::var("CALEMBED_TIMEZONE").unwrap_or(defaults.timezone);
    let cache_duration_secs = env_parse("CALEMBED_CACHE_DURATION", "cache duration")?
        .unwrap_or(defaults.cache_duration_secs);
    let max_results =
        env_parse("CALEMBED_MAX_RESULTS", "max results")?.unwrap_or(defaults.max_results);

    validate(EmbedConfig {
        calendar_id: Some(calendar_id),
        timezone,
        cache_duration_secs,
        max_results,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CalEmbedError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<EmbedConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CalEmbedError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CalEmbedError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CalEmbedError::Config(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, &config_path)?)
}

/// Check and normalize a loaded configuration
///
/// Trims the calendar id and time zone, rejects unknown time zones and a zero
/// result limit, and clamps the cache duration into range.
///
/// # Errors
/// Returns `CalEmbedError::Config` for an unknown time zone or a zero
/// `max_results`.
pub fn validate(mut config: EmbedConfig) -> Result<EmbedConfig> {
    config.calendar_id = config.selected_calendar().map(str::to_string);

    config.timezone = config.timezone.trim().to_string();
    config.timezone.parse::<Tz>().map_err(|_| {
        CalEmbedError::Config(format!("Unknown time zone: {}", config.timezone))
    })?;

    if config.max_results == 0 {
        return Err(CalEmbedError::Config("max_results must be at least 1".to_string()));
    }

    let clamped = config.clamped_cache_duration();
    if clamped != config.cache_duration_secs {
        tracing::warn!(
            requested = config.cache_duration_secs,
            clamped,
            "Cache duration out of range, clamping"
        );
        config.cache_duration_secs = clamped;
    }

    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `CalEmbedError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<EmbedConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CalEmbedError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CalEmbedError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CalEmbedError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Searches the current working directory first, then the directory of the
/// running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    probe_dirs(&dirs)
}

fn probe_dirs(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `CalEmbedError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            CalEmbedError::Config(format!("Missing required environment variable: {key}"))
        })
}

/// Parse an optional numeric environment variable
///
/// # Errors
/// Returns `CalEmbedError::Config` if the variable is set but not a number.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CalEmbedError::Config(format!("Invalid {what}: {e}"))),
        Err(_) => Ok(None),
    }
}
