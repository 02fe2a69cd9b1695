//! Message sender capability used to deliver codes

use async_trait::async_trait;
use thiserror::Error;

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider message identifier (e.g. a Twilio SID)
    pub reference: String,
    /// Provider status at acceptance time (e.g. `queued`)
    pub status: Option<String>,
}

/// Why a message could not be handed to the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The destination itself is unusable; retrying or falling back will not help
    #[error("{reason}")]
    PermanentDestination { reason: String },

    /// Provider answered with an error unrelated to the destination
    #[error("Provider error {code:?}: {message}")]
    Provider { code: Option<i64>, message: String },

    /// Network or transport failure before a provider answer
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl SendError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, SendError::PermanentDestination { .. })
    }
}

/// Trait for SMS delivery integration
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `body` to a canonical destination
    async fn send(&self, destination: &str, body: &str) -> Result<SendReceipt, SendError>;

    /// Short provider name reported by the health check
    fn provider_name(&self) -> &'static str;
}

/// Periodic maintenance hook driven by the background sweeper
pub trait Sweepable: Send + Sync {
    /// Remove state that no read could observe any more
    fn sweep(&self) -> super::types::SweepReport;
}
