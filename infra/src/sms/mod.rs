//! SMS Service Module
//!
//! This module provides the message senders used to deliver verification
//! codes and the factory that picks one from configuration.
//!
//! ## Features
//!
//! - **Twilio Support**: Production SMS via the Twilio REST API
//! - **Mock Implementation**: Logged delivery for development and tests
//! - **Demo Mode**: No sender at all; the verification service simulates delivery
//! - **Security**: Phone number masking in logs

use sg_core::services::verification::MessageSender;
use sg_shared::{SmsConfig, SmsProvider};
use std::sync::Arc;

pub mod mock_sms;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use mock_sms::MockSmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create a message sender based on configuration
///
/// Returns `None` when codes should only be delivered in demo mode: either
/// demo mode was requested, or the requested provider cannot be built.
pub fn create_message_sender(config: &SmsConfig) -> Option<Arc<dyn MessageSender>> {
    match config.provider {
        SmsProvider::Demo => {
            tracing::info!("No SMS provider configured, codes are delivered in demo mode");
            None
        }
        SmsProvider::Mock => Some(Arc::new(MockSmsService::new())),
        SmsProvider::Twilio => create_twilio_sender(config),
    }
}

#[cfg(feature = "twilio-sms")]
fn create_twilio_sender(config: &SmsConfig) -> Option<Arc<dyn MessageSender>> {
    match TwilioConfig::from_sms_config(config).and_then(TwilioSmsService::new) {
        Ok(service) => Some(Arc::new(service)),
        Err(e) => {
            tracing::error!("Failed to initialize Twilio SMS service: {}", e);
            tracing::warn!("Falling back to demo mode");
            None
        }
    }
}

#[cfg(not(feature = "twilio-sms"))]
fn create_twilio_sender(_config: &SmsConfig) -> Option<Arc<dyn MessageSender>> {
    tracing::error!("Twilio SMS requires the twilio-sms feature, falling back to demo mode");
    None
}
