//! Main verification service implementation

use chrono::Duration;
use sg_shared::{phone::mask_email, RateLimitConfig};
use std::sync::Arc;

use crate::domain::entities::{RateLimitRecord, VerificationRecord};
use crate::domain::value_objects::{AdmitDecision, Destination, VerifyOutcome};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::KeyedStore;
use crate::services::clock::Clock;
use crate::services::rate_limit::RateLimiter;

use super::code_store::CodeStore;
use super::config::VerificationServiceConfig;
use super::traits::{MessageSender, SendError, Sweepable};
use super::types::{DeliveryMethod, IssueCodeResult, SweepReport};

const REAL_SMS_MESSAGE: &str = "SMS sent successfully to your phone!";
const DEMO_MODE_MESSAGE: &str = "Demo mode: Check console for verification code";
const DEMO_PROVIDER: &str = "demo";

/// Verification service orchestrating rate limiting, code storage and delivery
pub struct VerificationService<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    /// Pending codes per destination
    codes: CodeStore<C>,
    /// Issuance rate limiter
    limiter: RateLimiter<R>,
    /// Delivery channel; `None` means every issuance is simulated
    sender: Option<Arc<dyn MessageSender>>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<C, R> VerificationService<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `code_store` - Backing store for pending codes
    /// * `rate_store` - Backing store for rate limit windows
    /// * `sender` - Message sender, or `None` for demo mode only
    /// * `clock` - Time source for expiry and windows
    /// * `config` - Service configuration
    /// * `rate_limit` - Rate limit window configuration
    pub fn new(
        code_store: Arc<C>,
        rate_store: Arc<R>,
        sender: Option<Arc<dyn MessageSender>>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
        rate_limit: &RateLimitConfig,
    ) -> Self {
        Self {
            codes: CodeStore::new(
                code_store,
                Duration::seconds(config.code_ttl_seconds),
                config.max_attempts,
            ),
            limiter: RateLimiter::new(rate_store, rate_limit),
            sender,
            clock,
            config,
        }
    }

    /// Issue a verification code for a raw phone number
    ///
    /// This method:
    /// 1. Normalizes and validates the destination (no state is touched on failure)
    /// 2. Asks the rate limiter for admission
    /// 3. Generates and stores the code, replacing any pending one
    /// 4. Hands the message to the sender, bounded by the send timeout
    ///
    /// A stored code is never rolled back. Sender failures fall back to demo
    /// delivery, except a permanent destination rejection which fails the call.
    pub async fn issue_code(
        &self,
        raw_phone: &str,
        user_email: Option<&str>,
    ) -> DomainResult<IssueCodeResult> {
        let destination = Destination::parse(raw_phone)?;
        let now = self.clock.now();

        if let AdmitDecision::Denied {
            retry_after_seconds,
        } = self.limiter.admit(&destination, now)
        {
            tracing::warn!(
                phone = %destination.masked(),
                retry_after_seconds = retry_after_seconds,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(AuthError::RateLimitExceeded {
                retry_after_seconds,
            }
            .into());
        }

        let record = self.codes.issue(&destination, now);
        let masked_email = user_email.map(mask_email);
        tracing::info!(
            phone = %destination.masked(),
            email = masked_email.as_deref(),
            expires_at = %record.expires_at,
            event = "otp_generated",
            "Generated new verification code"
        );

        let body = self.config.message_body(&record.code);

        if let Some(sender) = &self.sender {
            match tokio::time::timeout(
                self.config.send_timeout,
                sender.send(destination.as_str(), &body),
            )
            .await
            {
                Ok(Ok(receipt)) => {
                    tracing::info!(
                        phone = %destination.masked(),
                        provider = sender.provider_name(),
                        reference = %receipt.reference,
                        status = receipt.status.as_deref(),
                        event = "otp_sent",
                        "Verification code sent"
                    );
                    return Ok(IssueCodeResult {
                        method: DeliveryMethod::RealSms,
                        destination: destination.into_inner(),
                        code: self.exposed(&record.code),
                        provider_reference: Some(receipt.reference),
                        provider_status: receipt.status,
                        message: REAL_SMS_MESSAGE.to_string(),
                        demo_message: None,
                        expires_at: record.expires_at,
                    });
                }
                Ok(Err(SendError::PermanentDestination { reason })) => {
                    tracing::warn!(
                        phone = %destination.masked(),
                        provider = sender.provider_name(),
                        reason = %reason,
                        event = "otp_destination_rejected",
                        "Provider rejected destination"
                    );
                    return Err(AuthError::UndeliverableDestination { reason }.into());
                }
                Ok(Err(e)) => {
                    tracing::error!(
                        phone = %destination.masked(),
                        provider = sender.provider_name(),
                        error = %e,
                        event = "otp_send_failed",
                        "Failed to send verification code, falling back to demo mode"
                    );
                }
                Err(_) => {
                    tracing::error!(
                        phone = %destination.masked(),
                        provider = sender.provider_name(),
                        timeout_ms = self.config.send_timeout.as_millis() as u64,
                        event = "otp_send_timeout",
                        "Sender timed out, falling back to demo mode"
                    );
                }
            }
        }

        tracing::info!(
            phone = %destination.masked(),
            event = "otp_demo_delivery",
            "Demo mode delivery"
        );
        tracing::debug!(code = %record.code, message = %body, "Demo mode message");

        tokio::time::sleep(self.config.demo_delay).await;

        Ok(IssueCodeResult {
            method: DeliveryMethod::DemoMode,
            destination: destination.into_inner(),
            code: self.exposed(&record.code),
            provider_reference: None,
            provider_status: None,
            message: DEMO_MODE_MESSAGE.to_string(),
            demo_message: self.config.expose_code.then_some(body),
            expires_at: record.expires_at,
        })
    }

    /// Verify a supplied code for a raw phone number
    ///
    /// Returns the outcome rather than an error for every business result;
    /// use [`VerifyOutcome::into_result`] to turn failures into errors.
    /// Verification is never rate limited.
    pub fn verify_code(&self, raw_phone: &str, supplied: &str) -> DomainResult<VerifyOutcome> {
        let destination = match Destination::parse(raw_phone) {
            Ok(destination) => destination,
            // Nothing can be stored under an invalid destination
            Err(ValidationError::InvalidPhoneFormat) => return Ok(VerifyOutcome::NoCode),
            Err(e) => return Err(e.into()),
        };

        let outcome = self.codes.verify(&destination, supplied, self.clock.now());

        match outcome {
            VerifyOutcome::Verified => tracing::info!(
                phone = %destination.masked(),
                event = "otp_verified_success",
                "Verification code successfully verified"
            ),
            VerifyOutcome::Mismatch { attempts_remaining } => tracing::warn!(
                phone = %destination.masked(),
                remaining_attempts = attempts_remaining,
                event = "otp_verification_failed",
                "Verification code mismatch"
            ),
            VerifyOutcome::AttemptsExhausted => tracing::warn!(
                phone = %destination.masked(),
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded"
            ),
            VerifyOutcome::Expired => tracing::info!(
                phone = %destination.masked(),
                event = "otp_expired",
                "Verification code expired"
            ),
            VerifyOutcome::NoCode => tracing::debug!(
                phone = %destination.masked(),
                event = "otp_not_found",
                "No pending verification code"
            ),
        }

        Ok(outcome)
    }

    fn exposed(&self, code: &str) -> Option<String> {
        self.config.expose_code.then(|| code.to_string())
    }

    /// Whether a real message sender is wired in
    pub fn sender_configured(&self) -> bool {
        self.sender.is_some()
    }

    /// Name of the active provider, `demo` when none is configured
    pub fn provider_name(&self) -> &'static str {
        self.sender
            .as_ref()
            .map_or(DEMO_PROVIDER, |sender| sender.provider_name())
    }

    pub fn pending_codes(&self) -> usize {
        self.codes.pending_count()
    }

    pub fn tracked_destinations(&self) -> usize {
        self.limiter.tracked()
    }
}

impl<C, R> Sweepable for VerificationService<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    fn sweep(&self) -> SweepReport {
        let now = self.clock.now();
        SweepReport {
            expired_codes_removed: self.codes.sweep_expired(now),
            rate_limits_evicted: self.limiter.sweep(now),
        }
    }
}
