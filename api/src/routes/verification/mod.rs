//! Verification code route handlers
//!
//! - `send_code` - issue a code to a phone number
//! - `verify_code` - check a supplied code
//! - `health` - liveness and sender state

pub mod health;
pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use sg_core::domain::{RateLimitRecord, VerificationRecord};
use sg_core::repositories::KeyedStore;
use sg_core::services::VerificationService;

/// Application state that holds shared services
pub struct AppState<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    pub verification_service: Arc<VerificationService<C, R>>,
}

impl<C, R> AppState<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    pub fn new(verification_service: Arc<VerificationService<C, R>>) -> Self {
        Self {
            verification_service,
        }
    }
}

impl<C, R> Clone for AppState<C, R>
where
    C: KeyedStore<VerificationRecord>,
    R: KeyedStore<RateLimitRecord>,
{
    fn clone(&self) -> Self {
        Self {
            verification_service: Arc::clone(&self.verification_service),
        }
    }
}
