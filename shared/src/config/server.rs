//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Origins allowed by CORS; empty or containing `*` means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for the CORS preflight cache in seconds
    #[serde(default = "default_cors_max_age")]
    pub cors_max_age: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3001,
            allowed_origins: Vec::new(),
            cors_max_age: default_cors_max_age(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Load from `SERVER_HOST`, `SERVER_PORT`/`PORT` and `CORS_*` variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = match env_string("SERVER_PORT") {
            Some(_) => env_parse("SERVER_PORT", defaults.port),
            None => env_parse("PORT", defaults.port),
        };
        let allowed_origins = env_string("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: env_string("SERVER_HOST").unwrap_or(defaults.host),
            port,
            allowed_origins,
            cors_max_age: env_parse("CORS_MAX_AGE", defaults.cors_max_age),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_cors_max_age() -> usize {
    3600
}
