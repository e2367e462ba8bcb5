//! Runtime configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `RETIME_*` environment variables. CLI flags are applied on top by the binary.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "retime.toml";

/// Prefix for environment overrides (e.g. `RETIME_MIN_DELAY_MS=1000`)
pub const ENV_PREFIX: &str = "RETIME_";

/// GoPro media API
pub mod api {
    /// Base URL of the media API
    pub const BASE_URL: &str = "https://api.gopro.com";

    /// Media type the API expects for media updates
    pub const MEDIA_ACCEPT: &str = "application/vnd.gopro.jk.media+json; version=2.0.0";

    /// Key of the bearer token inside the media library page state
    pub const PAGE_TOKEN_KEY: &str = "gpAccessToken";
}

/// Pacing between consecutive media updates
pub mod pacing {
    /// Lower bound (inclusive) of the inter-request delay, in milliseconds
    pub const MIN_DELAY_MS: u64 = 2500;

    /// Upper bound (exclusive) of the inter-request delay, in milliseconds
    pub const MAX_DELAY_MS: u64 = 5000;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for media updates (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout (in seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

/// Effective settings for one invocation.
///
/// `Debug` redacts `access_token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the media update service
    pub api_base_url: String,
    /// Inclusive lower bound of the pacing delay
    pub min_delay_ms: u64,
    /// Exclusive upper bound of the pacing delay
    pub max_delay_ms: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Offset applied to start times given without one (e.g. "+02:00")
    pub utc_offset: String,
    /// Bearer token, if provided through config or environment
    pub access_token: Option<String>,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: api::BASE_URL.to_string(),
            min_delay_ms: pacing::MIN_DELAY_MS,
            max_delay_ms: pacing::MAX_DELAY_MS,
            request_timeout_secs: network::REQUEST_TIMEOUT_SECS,
            utc_offset: "+00:00".to_string(),
            access_token: None,
            log_level: "info".to_string(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_base_url", &self.api_base_url)
            .field("min_delay_ms", &self.min_delay_ms)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("utc_offset", &self.utc_offset)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Loads settings from defaults, the given TOML file (if it exists) and the environment.
    ///
    /// When `config_file` is `None`, [`DEFAULT_CONFIG_FILE`] is tried. A missing file is not an error.
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks cross-field constraints figment cannot express.
    pub fn validate(&self) -> AppResult<()> {
        if self.min_delay_ms >= self.max_delay_ms {
            return Err(AppError::Config(format!(
                "min_delay_ms ({}) must be lower than max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
