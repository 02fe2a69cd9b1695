//! Application state and factory
//!
//! This module wires the in-memory stores, the message sender and the
//! verification service into shared state, and provides the factory for
//! the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use sg_core::domain::{RateLimitRecord, VerificationRecord};
use sg_core::repositories::KeyedStore;
use sg_core::services::{
    Clock, MessageSender, SystemClock, VerificationService, VerificationServiceConfig,
};
use sg_infra::cache::InMemoryKeyedStore;
use sg_shared::{AppConfig, Environment, ServerConfig};

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::verification::{
    health::health_check, send_code::send_code, verify_code::verify_code,
};
use crate::routes::AppState;

pub type CodeStoreBackend = InMemoryKeyedStore<VerificationRecord>;
pub type RateStoreBackend = InMemoryKeyedStore<RateLimitRecord>;
pub type InMemoryAppState = AppState<CodeStoreBackend, RateStoreBackend>;

/// Build the shared state served by every worker
pub fn build_state(
    config: &AppConfig,
    sender: Option<Arc<dyn MessageSender>>,
    clock: Arc<dyn Clock>,
) -> InMemoryAppState {
    let shards = config.verification.store_shards;
    let service = VerificationService::new(
        Arc::new(CodeStoreBackend::new(shards)),
        Arc::new(RateStoreBackend::new(shards)),
        sender,
        clock,
        VerificationServiceConfig::from_settings(&config.verification, &config.sms),
        &config.rate_limit,
    );
    AppState::new(Arc::new(service))
}

/// Same as [`build_state`] with the system clock
pub fn build_default_state(
    config: &AppConfig,
    sender: Option<Arc<dyn MessageSender>>,
) -> InMemoryAppState {
    build_state(config, sender, Arc::new(SystemClock))
}

/// Create and configure the application with all dependencies
pub fn create_app<C, R>(
    app_state: web::Data<AppState<C, R>>,
    server: &ServerConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: KeyedStore<VerificationRecord> + 'static,
    R: KeyedStore<RateLimitRecord> + 'static,
{
    let cors = create_cors(server, environment);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Order matters: the last wrap runs first.
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<C, R>))
        .service(
            web::scope("/api")
                .route(
                    "/send-verification-code",
                    web::post().to(send_code::<C, R>),
                )
                .route("/verify-code", web::post().to(verify_code::<C, R>)),
        )
        .default_service(web::route().to(not_found))
}
