//! Pending code lifecycle: issue, verify, expire

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{Destination, VerifyOutcome};
use crate::repositories::KeyedStore;

/// Holds at most one pending verification record per destination
///
/// Every terminal outcome (verified, expired, exhausted) deletes the record.
/// Expiry is detected lazily on access; [`CodeStore::sweep_expired`] only
/// removes records a read would already treat as expired.
pub struct CodeStore<S: KeyedStore<VerificationRecord>> {
    store: Arc<S>,
    ttl: Duration,
    max_attempts: u32,
}

impl<S: KeyedStore<VerificationRecord>> CodeStore<S> {
    pub fn new(store: Arc<S>, ttl: Duration, max_attempts: u32) -> Self {
        Self {
            store,
            ttl,
            max_attempts,
        }
    }

    /// Generate a fresh code and replace any pending record
    pub fn issue(&self, destination: &Destination, now: DateTime<Utc>) -> VerificationRecord {
        let record = VerificationRecord::issue(destination.as_str(), now, self.ttl);
        self.store_record(record)
    }

    /// Store a record built around a known code
    #[cfg(test)]
    pub fn issue_with_code(
        &self,
        destination: &Destination,
        code: &str,
        now: DateTime<Utc>,
    ) -> VerificationRecord {
        let record = VerificationRecord::with_code(destination.as_str(), code, now, self.ttl);
        self.store_record(record)
    }

    fn store_record(&self, record: VerificationRecord) -> VerificationRecord {
        let stored = record.clone();
        self.store
            .with_entry(&record.destination, move |slot| *slot = Some(stored));
        record
    }

    /// Check `supplied` against the pending record
    ///
    /// Order matters: expiry, then the attempt budget, then the comparison.
    /// A request arriving after the last allowed failure reports exhaustion
    /// and deletes the record even when its code is correct.
    pub fn verify(
        &self,
        destination: &Destination,
        supplied: &str,
        now: DateTime<Utc>,
    ) -> VerifyOutcome {
        let max_attempts = self.max_attempts;

        self.store.with_entry(destination.as_str(), |slot| {
            let Some(record) = slot.as_mut() else {
                return VerifyOutcome::NoCode;
            };

            if record.is_expired(now) {
                *slot = None;
                return VerifyOutcome::Expired;
            }

            if record.attempts >= max_attempts {
                *slot = None;
                return VerifyOutcome::AttemptsExhausted;
            }

            if constant_time_eq(record.code.as_bytes(), supplied.as_bytes()) {
                *slot = None;
                return VerifyOutcome::Verified;
            }

            record.attempts += 1;
            VerifyOutcome::Mismatch {
                attempts_remaining: record.attempts_remaining(max_attempts),
            }
        })
    }

    /// Delete records strictly past their expiry; returns how many
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        self.store.retain(|_, record| !record.is_expired(now))
    }

    /// Snapshot of the pending record, if any
    pub fn pending(&self, destination: &Destination) -> Option<VerificationRecord> {
        self.store.get(destination.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.store.len()
    }
}
