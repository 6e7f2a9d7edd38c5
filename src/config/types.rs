//! Configuration types.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FREE_ENDPOINT, PREFERENCES_DIR, PREFERENCES_FILE,
    PRO_ENDPOINT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ip_finder::Config;
///
/// let config = Config {
///     timeout_seconds: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Free-tier base URL
    pub free_endpoint: String,

    /// Elevated-tier base URL
    pub pro_endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Preference file location (`None` uses the per-user default)
    pub prefs_path: Option<PathBuf>,

    /// Look up the caller's own address when a session starts
    pub detect_on_start: bool,
}

impl Config {
    /// Resolves the preference file path.
    ///
    /// Uses `prefs_path` when set, otherwise `$XDG_CONFIG_HOME/ip_finder/`,
    /// then `$HOME/.config/ip_finder/`, then `./.ip_finder/`.
    pub fn preferences_path(&self) -> PathBuf {
        if let Some(path) = &self.prefs_path {
            return path.clone();
        }
        default_preferences_path(
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )
    }
}

/// Per-user preference file from the raw `XDG_CONFIG_HOME` and `HOME` values.
///
/// Empty values count as unset.
fn default_preferences_path(xdg_config_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|dir| PathBuf::from(dir).join(".config"))
        });
    match base {
        Some(dir) => dir.join(PREFERENCES_DIR).join(PREFERENCES_FILE),
        None => PathBuf::from(format!(".{}", PREFERENCES_DIR)).join(PREFERENCES_FILE),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            free_endpoint: FREE_ENDPOINT.to_string(),
            pro_endpoint: PRO_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            prefs_path: None,
            detect_on_start: true,
        }
    }
}
