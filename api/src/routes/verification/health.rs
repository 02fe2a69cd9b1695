use actix_web::{web, HttpResponse};

use sg_core::domain::{RateLimitRecord, VerificationRecord};
use sg_core::repositories::KeyedStore;
use sg_shared::HealthResponse;

use super::AppState;

pub const SERVICE_NAME: &str = "SMS Authentication API";

/// Handler for GET /health
pub async fn health_check<C, R>(state: web::Data<AppState<C, R>>) -> HttpResponse
where
    C: KeyedStore<VerificationRecord> + 'static,
    R: KeyedStore<RateLimitRecord> + 'static,
{
    let service = &state.verification_service;
    HttpResponse::Ok().json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        service.provider_name(),
        service.sender_configured(),
    ))
}
