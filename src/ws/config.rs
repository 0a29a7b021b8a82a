#![expect(
    clippy::module_name_repetitions,
    reason = "Configuration types intentionally mirror the module name for clarity"
)]

use std::time::Duration;

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use url::Url;

use crate::Result;
use crate::error::Error;

const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.0;

/// Endpoint used by development builds.
pub const DEVELOPMENT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Environment variable holding the feed endpoint outside development.
pub const ENDPOINT_VAR: &str = "SENTIMENT_WEBSOCKET_URL";

/// Configuration for WebSocket client behavior.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Reconnection strategy configuration
    pub reconnect: ReconnectConfig,
}

impl Config {
    #[must_use]
    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }
}

/// Configuration for automatic reconnection behavior.
///
/// The default retries forever with a fixed ten second gap between a failure
/// and the next attempt.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of consecutive reconnection attempts before giving up.
    /// `None` means infinite retries.
    pub max_attempts: Option<u32>,
    /// Delay before the first reconnection attempt
    pub delay: Duration,
    /// Upper bound for the delay when it grows
    pub max_delay: Duration,
    /// Growth factor applied to the delay after each attempt; `1.0` keeps it fixed
    pub backoff_multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: DEFAULT_RECONNECT_DELAY,
            max_delay: DEFAULT_RECONNECT_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl ReconnectConfig {
    /// Fixed delay between attempts.
    #[must_use]
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_delay: delay,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub fn with_growth(mut self, multiplier: f64, max_delay: Duration) -> Self {
        self.backoff_multiplier = multiplier;
        self.max_delay = max_delay;
        self
    }
}

impl From<ReconnectConfig> for ExponentialBackoff {
    fn from(config: ReconnectConfig) -> Self {
        ExponentialBackoffBuilder::default()
            .with_initial_interval(config.delay)
            .with_max_interval(config.max_delay.max(config.delay))
            .with_multiplier(config.backoff_multiplier)
            .with_randomization_factor(0.0)
            .with_max_elapsed_time(None) // We handle max attempts separately
            .build()
    }
}

/// Build flavour that decides where the feed endpoint comes from.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// `Development` for debug builds, `Production` otherwise.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Pick the feed endpoint for `mode`.
///
/// Development always uses [`DEVELOPMENT_ENDPOINT`]. Production requires a
/// `ws://` or `wss://` URL in `configured`.
pub fn resolve_endpoint(mode: Mode, configured: Option<&str>) -> Result<Url> {
    let raw = match mode {
        Mode::Development => DEVELOPMENT_ENDPOINT,
        Mode::Production => configured
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                Error::validation(format!(
                    "{ENDPOINT_VAR} must be set outside development builds"
                ))
            })?,
    };

    let url = Url::parse(raw)?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        scheme => Err(Error::validation(format!(
            "feed endpoint must use ws or wss, got {scheme}"
        ))),
    }
}

/// Resolve the endpoint for the current build from the process environment.
pub fn endpoint_from_env() -> Result<Url> {
    let configured = std::env::var(ENDPOINT_VAR).ok();
    resolve_endpoint(Mode::current(), configured.as_deref())
}
