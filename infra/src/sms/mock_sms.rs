//! Mock SMS Service Implementation
//!
//! A mock message sender for development and testing. Messages are logged
//! instead of sent, and the last delivered body per destination is kept so
//! tests can read the code back.

use async_trait::async_trait;
use parking_lot::Mutex;
use sg_core::services::verification::{MessageSender, SendError, SendReceipt};
use sg_shared::phone::{is_valid_destination, mask_phone_number};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs messages with the destination masked
/// - Rejects malformed destinations as permanent failures
/// - Generates mock message references
/// - Tracks message count and the last body per destination
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate provider failures
    simulate_failure: Arc<AtomicBool>,
    /// Destinations answered with a permanent rejection
    unreachable: Arc<Mutex<Vec<String>>>,
    /// Last delivered body per destination
    outbox: Arc<Mutex<HashMap<String, String>>>,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Treat `destination` as unreachable from now on
    pub fn mark_unreachable(&self, destination: impl Into<String>) {
        self.unreachable.lock().push(destination.into());
    }

    /// Last message body delivered to `destination`
    pub fn last_message(&self, destination: &str) -> Option<String> {
        self.outbox.lock().get(destination).cloned()
    }
}

#[async_trait]
impl MessageSender for MockSmsService {
    async fn send(&self, destination: &str, body: &str) -> Result<SendReceipt, SendError> {
        if !is_valid_destination(destination) {
            return Err(SendError::PermanentDestination {
                reason: "Invalid phone number. Please check and try again.".to_string(),
            });
        }

        if self.unreachable.lock().iter().any(|d| d == destination) {
            return Err(SendError::PermanentDestination {
                reason: "Phone number is not reachable.".to_string(),
            });
        }

        // Simulate failure if configured
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                mask_phone_number(destination)
            );
            return Err(SendError::Provider {
                code: None,
                message: "Simulated SMS sending failure".to_string(),
            });
        }

        let reference = format!("mock_{}", Uuid::new_v4().simple());
        self.message_count.fetch_add(1, Ordering::SeqCst);
        self.outbox
            .lock()
            .insert(destination.to_string(), body.to_string());

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(destination),
            message_id = %reference,
            message_length = body.len(),
            "SMS sent successfully (mock)"
        );

        Ok(SendReceipt {
            reference,
            status: Some("queued".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
