use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use sg_api::{build_default_state, create_app, telemetry::init_tracing};
use sg_core::services::Sweepable;
use sg_infra::services::{StateSweeper, SweeperConfig};
use sg_infra::sms::create_message_sender;
use sg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        provider = %config.sms.provider,
        expose_code = config.verification.expose_code,
        "Starting SmsGate server"
    );

    let sender = create_message_sender(&config.sms);
    let state = web::Data::new(build_default_state(&config, sender));

    let sweepable: Arc<dyn Sweepable> = state.verification_service.clone();
    let sweeper = StateSweeper::new(
        sweepable,
        SweeperConfig::from_interval(config.verification.sweep_interval_seconds),
    )
    .start_background_task();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let server_config = config.server.clone();
    let environment = config.environment;
    HttpServer::new(move || create_app(state.clone(), &server_config, environment))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    tracing::info!("Server stopped");
    Ok(())
}
