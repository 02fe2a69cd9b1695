use actix_web::{web, HttpResponse};

use sg_core::domain::{RateLimitRecord, VerificationRecord};
use sg_core::errors::ValidationError;
use sg_core::repositories::KeyedStore;

use super::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::handle_domain_error;

pub const FIELDS_REQUIRED_MESSAGE: &str = "Phone number and code are required";

/// Handler for POST /api/verify-code
///
/// Answers 200 with `{success, verified, message}` when the code matches.
/// Every other outcome is a 400 naming the reason; a wrong code also
/// reports `attemptsRemaining`.
pub async fn verify_code<C, R>(
    state: web::Data<AppState<C, R>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    C: KeyedStore<VerificationRecord> + 'static,
    R: KeyedStore<RateLimitRecord> + 'static,
{
    let Some((phone, code)) = request.fields() else {
        return handle_domain_error(ValidationError::missing(FIELDS_REQUIRED_MESSAGE).into());
    };

    let outcome = state
        .verification_service
        .verify_code(phone, code)
        .and_then(|outcome| outcome.into_result());

    match outcome {
        Ok(()) => HttpResponse::Ok().json(VerifyCodeResponse::verified()),
        Err(error) => handle_domain_error(error),
    }
}
