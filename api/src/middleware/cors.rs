//! CORS middleware configuration for cross-origin requests.
//!
//! Development accepts any origin. Other environments accept the configured
//! origin list, falling back to any origin when the list is empty or
//! contains `*`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sg_shared::{Environment, ServerConfig};

/// Creates a CORS middleware instance for the given server settings.
pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    if environment.is_development() || allows_any_origin(&server.allowed_origins) {
        create_permissive_cors(server.cors_max_age)
    } else {
        create_restricted_cors(&server.allowed_origins, server.cors_max_age)
    }
}

const WILDCARD_ORIGIN: &str = "*";

// actix-cors refuses `*` as a listed origin and fails app startup.
fn allows_any_origin(origins: &[String]) -> bool {
    origins.is_empty() || origins.iter().any(|origin| origin == WILDCARD_ORIGIN)
}

fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(max_age)
}

fn create_permissive_cors(max_age: usize) -> Cors {
    tracing::debug!("Configuring CORS to allow any origin");
    base_cors(max_age).allow_any_origin()
}

fn create_restricted_cors(origins: &[String], max_age: usize) -> Cors {
    origins.iter().fold(base_cors(max_age), |cors, origin| {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(server: ServerConfig, environment: Environment, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&server, environment))
                .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/health")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let mut server = ServerConfig::default();
        server.allowed_origins = vec!["https://app.example.com".to_string()];

        let status = preflight(server, Environment::Development, "https://other.example.com").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_production_restricts_to_configured_origins() {
        let mut server = ServerConfig::default();
        server.allowed_origins = vec!["https://app.example.com".to_string()];

        let allowed = preflight(server.clone(), Environment::Production, "https://app.example.com").await;
        assert_eq!(allowed, StatusCode::OK);

        let denied = preflight(server, Environment::Production, "https://evil.example.com").await;
        assert_eq!(denied, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_wildcard_entry_allows_any_origin() {
        let mut server = ServerConfig::default();
        server.allowed_origins = vec!["https://app.example.com".to_string(), "*".to_string()];

        let status = preflight(server, Environment::Production, "https://other.example.com").await;
        assert_eq!(status, StatusCode::OK);
    }
}
