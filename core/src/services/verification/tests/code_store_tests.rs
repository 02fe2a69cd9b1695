//! Unit tests for the pending code lifecycle

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{Destination, VerifyOutcome};
use crate::repositories::MockKeyedStore;
use crate::services::verification::CodeStore;

fn store() -> CodeStore<MockKeyedStore<VerificationRecord>> {
    CodeStore::new(Arc::new(MockKeyedStore::new()), Duration::minutes(5), 3)
}

fn destination() -> Destination {
    Destination::parse("+14155552671").unwrap()
}

#[test]
fn test_fresh_code_verifies_exactly_once() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    let record = codes.issue(&dest, now);

    assert_eq!(codes.verify(&dest, &record.code, now), VerifyOutcome::Verified);
    assert_eq!(codes.verify(&dest, &record.code, now), VerifyOutcome::NoCode);
    assert_eq!(codes.pending_count(), 0);
}

#[test]
fn test_unknown_destination_has_no_code() {
    let codes = store();
    assert_eq!(codes.verify(&destination(), "123456", Utc::now()), VerifyOutcome::NoCode);
}

#[test]
fn test_mismatch_counts_down() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    codes.issue_with_code(&dest, "123456", now);

    assert_eq!(
        codes.verify(&dest, "000000", now),
        VerifyOutcome::Mismatch { attempts_remaining: 2 }
    );
    assert_eq!(
        codes.verify(&dest, "000001", now),
        VerifyOutcome::Mismatch { attempts_remaining: 1 }
    );
    assert_eq!(
        codes.verify(&dest, "000002", now),
        VerifyOutcome::Mismatch { attempts_remaining: 0 }
    );
    assert_eq!(codes.pending(&dest).unwrap().attempts, 3);
}

#[test]
fn test_fourth_attempt_exhausts_even_with_correct_code() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    codes.issue_with_code(&dest, "123456", now);

    for wrong in ["000000", "111111", "222222"] {
        assert!(matches!(codes.verify(&dest, wrong, now), VerifyOutcome::Mismatch { .. }));
    }

    assert_eq!(codes.verify(&dest, "123456", now), VerifyOutcome::AttemptsExhausted);
    assert!(codes.pending(&dest).is_none());
    assert_eq!(codes.verify(&dest, "123456", now), VerifyOutcome::NoCode);
}

#[test]
fn test_correct_code_after_failures_within_budget() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    codes.issue_with_code(&dest, "123456", now);

    codes.verify(&dest, "000000", now);
    codes.verify(&dest, "000001", now);
    assert_eq!(codes.verify(&dest, "123456", now), VerifyOutcome::Verified);
}

#[test]
fn test_expired_code_is_deleted() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    let record = codes.issue(&dest, now);

    let later = now + Duration::minutes(5) + Duration::seconds(1);
    assert_eq!(codes.verify(&dest, &record.code, later), VerifyOutcome::Expired);
    assert!(codes.pending(&dest).is_none());
}

#[test]
fn test_expiry_checked_before_attempts() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    codes.issue_with_code(&dest, "123456", now);
    for wrong in ["000000", "111111", "222222"] {
        codes.verify(&dest, wrong, now);
    }

    let later = now + Duration::minutes(6);
    assert_eq!(codes.verify(&dest, "123456", later), VerifyOutcome::Expired);
}

#[test]
fn test_reissue_replaces_and_resets_attempts() {
    let codes = store();
    let now = Utc::now();
    let dest = destination();
    codes.issue_with_code(&dest, "111111", now);
    codes.verify(&dest, "000000", now);

    codes.issue_with_code(&dest, "222222", now + Duration::seconds(1));
    let pending = codes.pending(&dest).unwrap();
    assert_eq!(pending.code, "222222");
    assert_eq!(pending.attempts, 0);
    assert_eq!(codes.pending_count(), 1);

    assert!(matches!(codes.verify(&dest, "111111", now), VerifyOutcome::Mismatch { .. }));
}

#[test]
fn test_sweep_removes_only_expired_records() {
    let codes = store();
    let now = Utc::now();
    let old = destination();
    let fresh = Destination::parse("+442071838750").unwrap();

    codes.issue(&old, now);
    codes.issue(&fresh, now + Duration::minutes(4));

    // Exactly at expiry the record is still readable
    assert_eq!(codes.sweep_expired(now + Duration::minutes(5)), 0);

    let removed = codes.sweep_expired(now + Duration::minutes(5) + Duration::milliseconds(1));
    assert_eq!(removed, 1);
    assert!(codes.pending(&old).is_none());
    assert!(codes.pending(&fresh).is_some());
}
