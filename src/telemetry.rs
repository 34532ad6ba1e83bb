//! Tracing setup.
//!
//! The terminal UI owns the screen, so interactive runs log to a file; batch and list
//! runs log to stderr.

use crate::config::LoggingConfig;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Filter from, in order: the `--log-level` override, `RUST_LOG`, then the config level.
pub fn build_filter(cli_level: Option<&str>, config: &LoggingConfig) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level)
            .map_err(|e| eyre!("Invalid log level '{}': {}", level, e));
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| eyre!("Invalid logging.level '{}': {}", config.level, e)),
    }
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed by the host.
pub fn init_tracing(
    target: &LogTarget,
    cli_level: Option<&str>,
    config: &LoggingConfig,
) -> Result<bool> {
    let filter = build_filter(cli_level, config)?;
    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
    };
    Ok(installed)
}
