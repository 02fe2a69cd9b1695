//! Verification code configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, Environment};

/// Verification code lifetime and store tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds until an issued code expires
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Failed verifications tolerated before the code is discarded
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Echo the code in the issuance response (demo/debug only)
    #[serde(default)]
    pub expose_code: bool,

    /// Interval of the background sweeper in seconds; 0 disables it
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Number of lock shards in the in-memory stores
    #[serde(default = "default_store_shards")]
    pub store_shards: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl VerificationConfig {
    /// Defaults for an environment; codes are only echoed outside production
    pub fn for_environment(env: Environment) -> Self {
        Self {
            code_ttl_seconds: default_code_ttl_seconds(),
            max_attempts: default_max_attempts(),
            expose_code: !env.is_production(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            store_shards: default_store_shards(),
        }
    }

    /// Environment defaults overridden by `CODE_*`, `EXPOSE_CODE_IN_RESPONSE`,
    /// `SWEEP_INTERVAL_SECONDS` and `STORE_SHARDS`
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);
        Self {
            code_ttl_seconds: env_parse("CODE_TTL_SECONDS", defaults.code_ttl_seconds).max(1),
            max_attempts: env_parse("CODE_MAX_ATTEMPTS", defaults.max_attempts).max(1),
            expose_code: env_parse("EXPOSE_CODE_IN_RESPONSE", defaults.expose_code),
            sweep_interval_seconds: env_parse(
                "SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            store_shards: env_parse("STORE_SHARDS", defaults.store_shards).max(1),
        }
    }
}

fn default_code_ttl_seconds() -> u64 {
    300 // 5 minutes
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_store_shards() -> usize {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_hides_code() {
        assert!(!VerificationConfig::for_environment(Environment::Production).expose_code);
        assert!(VerificationConfig::for_environment(Environment::Development).expose_code);
        assert!(VerificationConfig::for_environment(Environment::Staging).expose_code);
    }

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_ttl_seconds, 300);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.store_shards, 16);
    }
}
