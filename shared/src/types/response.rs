//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TWILIO_PROVIDER: &str = "twilio";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Whether a real message sender is wired in
    pub sender_configured: bool,

    /// Active provider name (e.g. "twilio", "demo")
    pub provider: String,

    /// Twilio state, `configured` only when Twilio is the active sender
    pub twilio: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Build a healthy response for the given sender state
    pub fn healthy(
        service: impl Into<String>,
        version: impl Into<String>,
        provider: impl Into<String>,
        sender_configured: bool,
    ) -> Self {
        let provider = provider.into();
        let twilio_ready = sender_configured && provider == TWILIO_PROVIDER;
        Self {
            status: HealthStatus::Healthy,
            service: service.into(),
            sender_configured,
            twilio: if twilio_ready { "configured" } else { "not_available" }.to_string(),
            provider,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}
