//! Configuration module with service-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-destination rate limiting for code issuance
//! - `server` - HTTP server and CORS configuration
//! - `sms` - Message sender provider selection and credentials
//! - `verification` - Verification code lifetime, attempts and store tuning
//!
//! Every sub-configuration has a `Default` and a `from_env()` constructor.
//! Malformed values fall back to the default and are reported with a warning.

pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Verification code configuration
    pub verification: VerificationConfig,

    /// Message sender configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            rate_limit: RateLimitConfig::default(),
            verification: VerificationConfig::for_environment(env),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            verification: VerificationConfig::from_env(environment),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    key = key,
                    value = %raw,
                    default = %default,
                    "Invalid configuration value, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

/// Read an environment variable, treating blank values as unset.
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
