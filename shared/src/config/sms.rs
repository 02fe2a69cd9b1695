//! Message sender configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Which message sender backs code delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// No transport; every code goes through simulated delivery
    #[default]
    Demo,
    /// Logging sender that accepts every well-formed destination
    Mock,
    /// Twilio Programmable Messaging REST API
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demo" | "none" => Ok(SmsProvider::Demo),
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

impl std::fmt::Display for SmsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmsProvider::Demo => write!(f, "demo"),
            SmsProvider::Mock => write!(f, "mock"),
            SmsProvider::Twilio => write!(f, "twilio"),
        }
    }
}

/// SMS service configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: SmsProvider,

    /// Twilio Account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio Auth Token
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Sending phone number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,

    /// Upper bound on a single send call in milliseconds
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Simulated delivery delay in milliseconds
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,

    /// Product name placed at the start of every message
    #[serde(default = "default_brand_name")]
    pub brand_name: String,
}

// Credentials stay out of Debug output.
impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("provider", &self.provider)
            .field("account_sid", &self.account_sid.as_ref().map(|_| "<set>"))
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("from_number", &self.from_number)
            .field("send_timeout_ms", &self.send_timeout_ms)
            .field("demo_delay_ms", &self.demo_delay_ms)
            .field("brand_name", &self.brand_name)
            .finish()
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            account_sid: None,
            auth_token: None,
            from_number: None,
            send_timeout_ms: default_send_timeout_ms(),
            demo_delay_ms: default_demo_delay_ms(),
            brand_name: default_brand_name(),
        }
    }
}

impl SmsConfig {
    /// Load from `SMS_*` and `TWILIO_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = match env_string("SMS_PROVIDER") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to demo mode", e);
                SmsProvider::Demo
            }),
            None => defaults.provider,
        };

        Self {
            provider,
            account_sid: env_string("TWILIO_ACCOUNT_SID"),
            auth_token: env_string("TWILIO_AUTH_TOKEN"),
            from_number: env_string("TWILIO_FROM_NUMBER"),
            send_timeout_ms: env_parse("SMS_SEND_TIMEOUT_MS", defaults.send_timeout_ms),
            demo_delay_ms: env_parse("SMS_DEMO_DELAY_MS", defaults.demo_delay_ms),
            brand_name: env_string("SMS_BRAND_NAME").unwrap_or(defaults.brand_name),
        }
    }

    /// Whether every credential needed by Twilio is present
    pub fn has_twilio_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

fn default_send_timeout_ms() -> u64 {
    10_000
}

fn default_demo_delay_ms() -> u64 {
    1_000
}

fn default_brand_name() -> String {
    String::from("SmsGate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Twilio".parse::<SmsProvider>().unwrap(), SmsProvider::Twilio);
        assert_eq!("none".parse::<SmsProvider>().unwrap(), SmsProvider::Demo);
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = SmsConfig {
            provider: SmsProvider::Twilio,
            account_sid: Some("ACsecret".to_string()),
            auth_token: Some("supersecret".to_string()),
            from_number: Some("+15550001111".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("supersecret"));
        assert!(!debug.contains("ACsecret"));
        assert!(config.has_twilio_credentials());
    }
}
