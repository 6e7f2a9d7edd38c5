//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_finder` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output
//!
//! All lookup functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ip_finder::app::{
    mask_key, print_lookup_statistics, run_interactive, run_lookups, summary_line, write_record,
};
use ip_finder::cli::{Cli, Command, KeyAction};
use ip_finder::config::API_KEY_ENV;
use ip_finder::initialization::init_logger_with;
use ip_finder::{
    ApiKeyPreference, FilePreferenceStore, IpLookupClient, LookupSession, TerminalNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; it may supply IP_FINDER_API_KEY for a single run
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let store = Arc::new(FilePreferenceStore::new(config.preferences_path()));
    log::debug!("Using preference file {}", store.path().display());

    let api_key = ApiKeyPreference::new(store)
        .with_session_override(std::env::var(API_KEY_ENV).ok());
    let client =
        IpLookupClient::from_config(&config).context("Failed to initialize lookup client")?;
    let session = LookupSession::new(client, api_key, Arc::new(TerminalNotifier));

    if let Some(Command::Key { action }) = &cli.command {
        let result = match action {
            KeyAction::Set { key } => session.set_api_key_preference(key).map(|_| ()),
            KeyAction::Clear => session.set_api_key_preference("").map(|_| ()),
            KeyAction::Show => {
                match session.api_key_preference() {
                    Some(key) => println!("API key: {} (pro endpoint)", mask_key(&key)),
                    None => println!("No API key set (free endpoint)"),
                }
                Ok(())
            }
        };
        if result.is_err() {
            process::exit(1);
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout();

    if config.detect_on_start {
        if let Some(record) = session.detect_caller_address().await {
            if cli.subjects.is_empty() {
                write_record(&mut stdout, &record, true, cli.json)?;
            } else {
                log::info!("Your IP: {} (Auto-detected)", record.query);
            }
        }
    }

    let failed = run_lookups(&session, &cli.subjects, &mut stdout, cli.json)
        .await
        .context("Failed to write lookup results")?;

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_interactive(&session, stdin, &mut stdout, cli.json)
            .await
            .context("Interactive session failed")?;
        println!("{}", summary_line(&session.lookup_stats()));
    }

    print_lookup_statistics(&session.lookup_stats());

    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}
