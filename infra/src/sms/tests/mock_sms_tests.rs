//! Unit tests for the mock SMS service

use sg_core::services::verification::{MessageSender, SendError};

use crate::sms::MockSmsService;

#[test]
fn test_mock_sms_send_success() {
    let service = MockSmsService::new();
    let receipt = tokio_test::block_on(service.send("+14155552671", "Test message")).unwrap();

    assert!(receipt.reference.starts_with("mock_"));
    assert_eq!(receipt.status.as_deref(), Some("queued"));
    assert_eq!(service.get_message_count(), 1);
    assert_eq!(service.last_message("+14155552671").as_deref(), Some("Test message"));
}

#[test]
fn test_mock_sms_invalid_phone_is_permanent() {
    let service = MockSmsService::new();
    let result = tokio_test::block_on(service.send("4155552671", "Test message"));

    assert!(matches!(result, Err(SendError::PermanentDestination { .. })));
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::new();
    service.set_simulate_failure(true);

    let result = service.send("+14155552671", "Test message").await;
    match result {
        Err(e) => assert!(!e.is_permanent()),
        Ok(_) => panic!("expected simulated failure"),
    }

    service.set_simulate_failure(false);
    assert!(service.send("+14155552671", "Test message").await.is_ok());
}

#[tokio::test]
async fn test_mock_sms_unreachable_destination() {
    let service = MockSmsService::new();
    service.mark_unreachable("+14155552671");

    match service.send("+14155552671", "Test message").await {
        Err(SendError::PermanentDestination { reason }) => {
            assert_eq!(reason, "Phone number is not reachable.")
        }
        other => panic!("expected permanent failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mock_sms_counter() {
    let service = MockSmsService::new();

    for i in 1..=3 {
        let _ = service.send("+14155552671", &format!("Message {}", i)).await;
        assert_eq!(service.get_message_count(), i);
    }
    assert_eq!(service.last_message("+14155552671").as_deref(), Some("Message 3"));

    service.reset_counter();
    assert_eq!(service.get_message_count(), 0);
}
