//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Programmable Messaging REST API
//! (`POST /2010-04-01/Accounts/{sid}/Messages.json`) with HTTP basic auth.
//!
//! Twilio error codes 21614 (not a mobile number / invalid) and 21608
//! (unreachable) are reported as permanent destination failures; everything
//! else is a provider or transport error the caller may recover from.

use async_trait::async_trait;
use serde::Deserialize;
use sg_core::services::verification::{MessageSender, SendError, SendReceipt};
use sg_shared::{phone::mask_phone_number, SmsConfig};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::InfrastructureError;

/// Public Twilio API host
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Twilio limit on a single message body
pub const MAX_MESSAGE_LENGTH: usize = 1600;

const INVALID_NUMBER_CODE: i64 = 21614;
const UNREACHABLE_NUMBER_CODE: i64 = 21608;

/// Twilio SMS service configuration
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// API host, overridable for tests
    pub api_base: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("from_number", &self.from_number)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl TwilioConfig {
    /// Build from the loaded SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let missing = |name: &str| InfrastructureError::Config(format!("{} not set", name));

        let account_sid = config
            .account_sid
            .clone()
            .ok_or_else(|| missing("TWILIO_ACCOUNT_SID"))?;
        let auth_token = config
            .auth_token
            .clone()
            .ok_or_else(|| missing("TWILIO_AUTH_TOKEN"))?;
        let from_number = config
            .from_number
            .clone()
            .ok_or_else(|| missing("TWILIO_FROM_NUMBER"))?;

        // Validate from number format
        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            api_base: TWILIO_API_BASE.to_string(),
            // The service applies its own send timeout; this only bounds a stuck connection
            request_timeout_secs: (config.send_timeout_ms / 1000).max(1) * 2,
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

/// Accepted message as returned by Twilio
#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// Error body returned by Twilio on 4xx/5xx
#[derive(Debug, Default, Deserialize)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Map a Twilio error answer onto a send error
pub fn classify_error(http_status: u16, body: TwilioErrorBody) -> SendError {
    match body.code {
        Some(INVALID_NUMBER_CODE) => SendError::PermanentDestination {
            reason: "Invalid phone number. Please check and try again.".to_string(),
        },
        Some(UNREACHABLE_NUMBER_CODE) => SendError::PermanentDestination {
            reason: "Phone number is not reachable.".to_string(),
        },
        code => SendError::Provider {
            code,
            message: body
                .message
                .unwrap_or_else(|| format!("HTTP status {}", http_status)),
        },
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MessageSender for TwilioSmsService {
    async fn send(&self, destination: &str, body: &str) -> Result<SendReceipt, SendError> {
        if body.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(SendError::Provider {
                code: None,
                message: format!(
                    "Message exceeds maximum length of {} characters",
                    MAX_MESSAGE_LENGTH
                ),
            });
        }

        debug!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(destination),
            body.len()
        );

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", destination),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| SendError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let message: TwilioMessage =
                response.json().await.map_err(|e| SendError::Transport {
                    message: format!("Unreadable Twilio response: {}", e),
                })?;
            info!(
                "SMS sent successfully to {} with SID: {}",
                mask_phone_number(destination),
                message.sid
            );
            return Ok(SendReceipt {
                reference: message.sid,
                status: message.status,
            });
        }

        let error_body = response.json::<TwilioErrorBody>().await.unwrap_or_default();
        let send_error = classify_error(status.as_u16(), error_body);
        error!(
            "Twilio rejected SMS to {} (HTTP {}): {}",
            mask_phone_number(destination),
            status.as_u16(),
            send_error
        );
        Err(send_error)
    }

    fn provider_name(&self) -> &'static str {
        "twilio"
    }
}
