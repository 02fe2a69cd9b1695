//! End-to-end tests for the verification endpoints

use std::sync::Arc;

use actix_web::{
    http::{header, StatusCode},
    test, web,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use sg_api::{build_state, create_app, InMemoryAppState};
use sg_core::services::{ManualClock, MessageSender};
use sg_infra::sms::MockSmsService;
use sg_shared::{AppConfig, Environment};

const PHONE: &str = "+14155552671";

fn test_config(environment: Environment) -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = environment;
    config.verification.expose_code = !environment.is_production();
    config.sms.demo_delay_ms = 0;
    config
}

fn demo_state(config: &AppConfig, clock: Arc<ManualClock>) -> web::Data<InMemoryAppState> {
    web::Data::new(build_state(config, None, clock))
}

macro_rules! init_app {
    ($state:expr, $config:expr) => {
        test::init_service(create_app($state.clone(), &$config.server, $config.environment)).await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn test_demo_issue_then_verify_once() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": "(415) 555-2671" }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["method"], "demo_mode");
    assert_eq!(body["phoneNumber"], PHONE);
    assert!(body["demoMessage"].as_str().unwrap().contains("verification code"));
    let code = body["verificationCode"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": "4155552671", "code": code }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "verified": true, "message": "Code verified successfully" }));

    let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": PHONE, "code": code }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No verification code found");
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_production_hides_code() {
    let config = test_config(Environment::Production);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("verificationCode").is_none());
    assert!(body.get("demoMessage").is_none());
    assert_eq!(body["method"], "demo_mode");
}

#[actix_web::test]
async fn test_missing_fields_rejected() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({}));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone number is required");

    let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": PHONE }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone number and code are required");
}

#[actix_web::test]
async fn test_invalid_input_touches_no_state() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": "abc" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "PHONE_INVALID");

    let resp = post_json!(
        app,
        "/api/send-verification-code",
        json!({ "phoneNumber": PHONE, "userEmail": "not-an-email" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid email address");

    assert_eq!(state.verification_service.pending_codes(), 0);
    assert_eq!(state.verification_service.tracked_destinations(), 0);
}

#[actix_web::test]
async fn test_blank_email_is_ignored() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(
        app,
        "/api/send-verification-code",
        json!({ "phoneNumber": "4155552671", "userEmail": "" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["phoneNumber"], PHONE);
    assert_eq!(state.verification_service.pending_codes(), 1);
}

#[actix_web::test]
async fn test_fourth_request_rate_limited() {
    let config = test_config(Environment::Development);
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let state = demo_state(&config, clock.clone());
    let app = init_app!(state, config);

    for _ in 0..3 {
        let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
        assert_eq!(resp.status(), StatusCode::OK);
    }

    clock.advance(Duration::seconds(20));
    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "40");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["retryAfter"], 40);

    clock.advance(Duration::seconds(41));
    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_wrong_code_then_exhaustion() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    let body: Value = test::read_body_json(resp).await;
    let code = body["verificationCode"].as_str().unwrap().to_string();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for expected_remaining in [2, 1, 0] {
        let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": PHONE, "code": wrong }));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid verification code");
        assert_eq!(body["attemptsRemaining"], expected_remaining);
    }

    let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": PHONE, "code": code }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Too many failed attempts");
    assert_eq!(state.verification_service.pending_codes(), 0);
}

#[actix_web::test]
async fn test_expired_code_rejected() {
    let config = test_config(Environment::Development);
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let state = demo_state(&config, clock.clone());
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    let body: Value = test::read_body_json(resp).await;
    let code = body["verificationCode"].as_str().unwrap().to_string();

    clock.advance(Duration::seconds(301));
    let resp = post_json!(app, "/api/verify-code", json!({ "phoneNumber": PHONE, "code": code }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Verification code has expired");
}

#[actix_web::test]
async fn test_mock_sender_real_delivery() {
    let config = test_config(Environment::Production);
    let sender = MockSmsService::new();
    let state = web::Data::new(build_state(
        &config,
        Some(Arc::new(sender.clone()) as Arc<dyn MessageSender>),
        Arc::new(ManualClock::new(Utc::now())),
    ));
    let app = init_app!(state, config);

    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": PHONE }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["method"], "real_sms");
    assert_eq!(body["status"], "queued");
    assert!(body["messageSid"].as_str().unwrap().starts_with("mock_"));
    assert_eq!(body["message"], "SMS sent successfully to your phone!");
    assert_eq!(sender.get_message_count(), 1);

    sender.mark_unreachable("+442071838750");
    let resp = post_json!(app, "/api/send-verification-code", json!({ "phoneNumber": "+442071838750" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "DESTINATION_UNDELIVERABLE");
}

#[actix_web::test]
async fn test_malformed_json_and_unknown_route() {
    let config = test_config(Environment::Development);
    let state = demo_state(&config, Arc::new(ManualClock::new(Utc::now())));
    let app = init_app!(state, config);

    let req = test::TestRequest::post()
        .uri("/api/send-verification-code")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::get().uri("/api/does-not-exist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "NOT_FOUND");
}
