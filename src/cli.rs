//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{
    Config, LogFormat, LogLevel, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FREE_ENDPOINT,
    PRO_ENDPOINT,
};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Show your own IP
/// ip_finder
///
/// # Look up addresses
/// ip_finder 8.8.8.8 1.1.1.1
///
/// # Prompt for addresses
/// ip_finder --interactive
///
/// # Save a pro API key
/// ip_finder key set YOUR_KEY
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ip_finder",
    version,
    about = "Looks up geolocation and network information for IP addresses."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// IP addresses to look up
    pub subjects: Vec<String>,

    /// Read addresses from stdin, one per line
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip looking up your own address on start
    #[arg(long)]
    pub no_detect: bool,

    /// Print records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Preference file (default: ~/.config/ip_finder/preferences.json)
    #[arg(long, global = true)]
    pub prefs_path: Option<PathBuf>,

    /// Free-tier base URL
    #[arg(long, default_value = FREE_ENDPOINT, global = true)]
    pub free_endpoint: String,

    /// Pro-tier base URL
    #[arg(long, default_value = PRO_ENDPOINT, global = true)]
    pub pro_endpoint: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the pro-tier API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Save an API key (an empty value removes it)
    Set { key: String },
    /// Remove the saved API key
    Clear,
    /// Show whether a key is saved
    Show,
}

impl Cli {
    /// Maps parsed options onto the library configuration.
    pub fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            free_endpoint: self.free_endpoint.clone(),
            pro_endpoint: self.pro_endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            prefs_path: self.prefs_path.clone(),
            detect_on_start: !self.no_detect,
        }
    }
}
