//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `BITES_HOST` - Bind address (default: 127.0.0.1)
//! - `BITES_PORT` - Listen port (default: 3000)
//! - `BITES_STORAGE_DIR` - Directory for the persisted identity (default: .bites)
//! - `BITES_LATENCY_MS` - Simulated delay for login, registration, and loads (default: 1000)
//! - `BITES_PAYMENT_LATENCY_MS` - Simulated payment delay (default: 3000)
//! - `BITES_REDIRECT_DELAY_MS` - Delay before leaving the confirmation (default: 2000)
//! - `BITES_PAYMENT_APPROVAL_RATE` - Share of approved charges, 0.0 to 1.0 (default: 0.8)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::latency::Latency;
use crate::services::payment::DEFAULT_APPROVAL_RATE;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory backing the local identity storage
    pub storage_dir: PathBuf,
    /// Simulated remote-call delays
    pub latency: LatencyConfig,
    /// Probability that a simulated charge is approved
    pub payment_approval_rate: f64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Simulated delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Login, registration, menu load, order load
    pub remote: Latency,
    pub payment: Latency,
    /// Pause on the order confirmation before going to tracking
    pub redirect: Duration,
}

impl LatencyConfig {
    /// No delays anywhere.
    pub const NONE: Self = Self {
        remote: Latency::NONE,
        payment: Latency::NONE,
        redirect: Duration::ZERO,
    };
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            remote: Latency::from_millis(1000),
            payment: Latency::from_millis(3000),
            redirect: Duration::from_millis(2000),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("BITES_HOST", "127.0.0.1")?;
        let port = parse_env("BITES_PORT", "3000")?;
        let storage_dir = PathBuf::from(get_env_or_default("BITES_STORAGE_DIR", ".bites"));

        let latency = LatencyConfig {
            remote: Latency::from_millis(parse_env("BITES_LATENCY_MS", "1000")?),
            payment: Latency::from_millis(parse_env("BITES_PAYMENT_LATENCY_MS", "3000")?),
            redirect: Duration::from_millis(parse_env("BITES_REDIRECT_DELAY_MS", "2000")?),
        };

        let payment_approval_rate: f64 = parse_env(
            "BITES_PAYMENT_APPROVAL_RATE",
            &DEFAULT_APPROVAL_RATE.to_string(),
        )?;
        if !(0.0..=1.0).contains(&payment_approval_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "BITES_PAYMENT_APPROVAL_RATE".to_string(),
                "must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            storage_dir,
            latency,
            payment_approval_rate,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            storage_dir: PathBuf::from(".bites"),
            latency: LatencyConfig::default(),
            payment_approval_rate: DEFAULT_APPROVAL_RATE,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
