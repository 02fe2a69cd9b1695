use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::domain::{RateLimitRecord, VerificationRecord};
use sg_core::errors::ValidationError;
use sg_core::repositories::KeyedStore;

use super::AppState;
use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::handle_domain_error;

pub const PHONE_REQUIRED_MESSAGE: &str = "Phone number is required";

/// Handler for POST /api/send-verification-code
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "(415) 555-2671", "userEmail": "jane@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "method": "demo_mode",
///     "phoneNumber": "+14155552671",
///     "verificationCode": "004211",
///     "message": "Demo mode: Check console for verification code",
///     "demoMessage": "SmsGate verification code: 004211. ..."
/// }
/// ```
///
/// ## Errors
/// - 400: missing or malformed phone number, invalid email, undeliverable destination
/// - 429: rate limit exceeded, with `Retry-After`
pub async fn send_code<C, R>(
    state: web::Data<AppState<C, R>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    C: KeyedStore<VerificationRecord> + 'static,
    R: KeyedStore<RateLimitRecord> + 'static,
{
    let request = request.into_inner().normalized();

    let Some(phone) = request.phone() else {
        return handle_domain_error(ValidationError::missing(PHONE_REQUIRED_MESSAGE).into());
    };

    if request.validate().is_err() {
        return handle_domain_error(ValidationError::InvalidEmail.into());
    }

    let email = request.email();
    match state
        .verification_service
        .issue_code(phone, email)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(SendCodeResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
