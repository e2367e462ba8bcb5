//! Configuration, errors, logging and pacing

pub mod config;
pub mod error;
pub mod logging;
pub mod pacing;

// Re-exports for convenience
pub use config::Settings;
pub use error::{AppError, AppResult, ParseError};
pub use logging::init_logger;
pub use pacing::{DelayRange, Pacer};
