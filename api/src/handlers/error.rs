//! Mapping from domain errors to HTTP responses
//!
//! Business-rule failures become 400 with their message, rate limiting
//! becomes 429 with a `Retry-After` header, and anything unexpected is logged
//! in full and answered with a generic 500.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    HttpRequest, HttpResponse,
};

use sg_core::errors::{AuthError, DomainError};
use sg_shared::{error_codes, ErrorResponse};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds,
        }) => {
            let body = ErrorResponse::new(
                error_codes::RATE_LIMIT_EXCEEDED,
                AuthError::RateLimitExceeded {
                    retry_after_seconds,
                }
                .to_string(),
            )
            .with_retry_after(retry_after_seconds);

            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                .json(body)
        }
        DomainError::Auth(AuthError::InvalidVerificationCode { attempts_remaining }) => {
            let body = ErrorResponse::new(
                error_codes::VERIFICATION_CODE_INVALID,
                AuthError::InvalidVerificationCode { attempts_remaining }.to_string(),
            )
            .with_attempts_remaining(attempts_remaining);

            HttpResponse::BadRequest().json(body)
        }
        DomainError::Auth(auth_error) => HttpResponse::BadRequest()
            .json(ErrorResponse::new(auth_error.code(), auth_error.to_string())),
        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new(validation_error.code(), validation_error.to_string()),
        ),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error while handling request");
            internal_error()
        }
    }
}

/// Generic 500 body; the cause is never sent to the client
pub fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        INTERNAL_ERROR_MESSAGE,
    ))
}

/// Turn JSON extractor failures into the standard error body
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %error, "Rejected malformed JSON body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid JSON body",
    ));
    InternalError::from_response(error, response).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
