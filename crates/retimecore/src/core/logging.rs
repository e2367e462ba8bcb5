//! Logger initialization
//!
//! Installs a `tracing-subscriber` fmt layer on stderr. Library code logs through the
//! `log` facade; those records are forwarded into the same subscriber.

use tracing_subscriber::EnvFilter;

use crate::core::error::{AppError, AppResult};

/// Initialize the global logger
///
/// `RUST_LOG` wins over `default_level` when set.
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(AppError::Config)` - Invalid filter or a logger is already installed
pub fn init_logger(default_level: &str) -> AppResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", default_level, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}
