// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Claim Eligibility
//!
//! An address may claim when it has no record, or when its last claim is at
//! least [`COOLDOWN_MS`] old. A successful check immediately records the new
//! claim time, before any tokens move; a later transfer failure does not roll
//! the record back.
//!
//! ## Concurrency
//!
//! Read, decide and write run as one step per address: callers for the same
//! address queue on an async lock held across both store calls, so two
//! concurrent requests cannot both see the address as eligible. Different
//! addresses never contend. The lock is in-process only; several faucet
//! replicas sharing one store can still race.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::{
    models::WalletAddress,
    records::{ClaimRecordStore, RecordStoreError},
};

/// Minimum time between two claims of one address (24 hours).
pub const COOLDOWN_MS: i64 = 86_400_000;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;

/// Reasons a claim is refused.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("Try again after {} hours and {} minutes.", hours(.remaining_ms), minutes(.remaining_ms))]
    Cooldown { remaining_ms: i64 },

    #[error("Failed to check claim eligibility")]
    CheckFailed(#[source] RecordStoreError),

    #[error("Failed to set claim validity")]
    SetValidityFailed(#[source] RecordStoreError),
}

fn hours(remaining_ms: &i64) -> i64 {
    remaining_ms.div_euclid(MS_PER_HOUR)
}

fn minutes(remaining_ms: &i64) -> i64 {
    remaining_ms.rem_euclid(MS_PER_HOUR) / MS_PER_MINUTE
}

/// Gatekeeper for the 24-hour cooldown.
pub struct EligibilityChecker {
    store: Arc<dyn ClaimRecordStore>,
    locks: AddressLocks,
}

impl EligibilityChecker {
    pub fn new(store: Arc<dyn ClaimRecordStore>) -> Self {
        Self {
            store,
            locks: AddressLocks::default(),
        }
    }

    /// Check `address` against the wall clock and record the claim if allowed.
    pub async fn check_eligibility(&self, address: &WalletAddress) -> Result<(), EligibilityError> {
        self.check_eligibility_at(address, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Check `address` as of `now_ms` and record the claim if allowed.
    pub async fn check_eligibility_at(
        &self,
        address: &WalletAddress,
        now_ms: i64,
    ) -> Result<(), EligibilityError> {
        let _guard = self.locks.acquire(address).await;

        let record = self.store.read_record(address).await.map_err(|e| {
            warn!(wallet_address = %address, error = %e, "Failed to read claim record");
            EligibilityError::CheckFailed(e)
        })?;

        match record {
            None => {
                debug!(wallet_address = %address, "No previous claim");
            }
            Some(record) => match record
                .last_claim_ms()
                .and_then(|last_claim_ms| now_ms.checked_sub(last_claim_ms))
            {
                Some(elapsed) => {
                    if elapsed < COOLDOWN_MS {
                        let remaining_ms = COOLDOWN_MS.saturating_sub(elapsed);
                        info!(wallet_address = %address, remaining_ms, "Claim refused: cooldown active");
                        return Err(EligibilityError::Cooldown { remaining_ms });
                    }
                }
                None => {
                    // Unparseable or out-of-range timestamps never block a claim.
                    warn!(
                        wallet_address = %address,
                        last_claim_time = %record.last_claim_time,
                        "Claim record has a malformed timestamp, allowing claim"
                    );
                }
            },
        }

        self.store.write_record(address, now_ms).await.map_err(|e| {
            warn!(wallet_address = %address, error = %e, "Failed to write claim record");
            EligibilityError::SetValidityFailed(e)
        })?;

        Ok(())
    }

    #[cfg(test)]
    fn tracked_addresses(&self) -> usize {
        self.locks.len()
    }
}

/// Keyed async locks; an entry lives only while someone holds or awaits it.
#[derive(Default)]
struct AddressLocks {
    inner: Arc<Mutex<HashMap<WalletAddress, Arc<AsyncMutex<()>>>>>,
}

struct AddressGuard {
    address: WalletAddress,
    locks: Arc<Mutex<HashMap<WalletAddress, Arc<AsyncMutex<()>>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl AddressLocks {
    async fn acquire(&self, address: &WalletAddress) -> AddressGuard {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(address.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        AddressGuard {
            address: address.clone(),
            locks: self.inner.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for AddressGuard {
    fn drop(&mut self) {
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        self.guard.take();
        // Only the map's own reference left: nobody else holds or waits.
        if let Some(lock) = map.get(&self.address) {
            if Arc::strong_count(lock) == 1 {
                map.remove(&self.address);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::records::{ClaimRecord, InMemoryRecordStore};

    const NOW: i64 = 1_700_000_000_000;

    fn checker(store: Arc<InMemoryRecordStore>) -> EligibilityChecker {
        EligibilityChecker::new(store)
    }

    #[tokio::test]
    async fn first_claim_writes_current_time() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");

        checker(store.clone())
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap();

        assert_eq!(store.get(&address).await, Some(ClaimRecord::at(NOW)));
    }

    #[tokio::test]
    async fn claim_after_window_updates_record() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", &(NOW - COOLDOWN_MS).to_string()).await;

        checker(store.clone())
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap();

        assert_eq!(store.get(&address).await, Some(ClaimRecord::at(NOW)));
    }

    #[tokio::test]
    async fn claim_one_hour_later_reports_remaining_time() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", &(NOW - MS_PER_HOUR).to_string()).await;

        let err = checker(store.clone())
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, EligibilityError::Cooldown { remaining_ms } if remaining_ms == 23 * MS_PER_HOUR));
        assert_eq!(err.to_string(), "Try again after 23 hours and 0 minutes.");
        // The record is untouched.
        assert_eq!(
            store.get(&address).await,
            Some(ClaimRecord::at(NOW - MS_PER_HOUR))
        );
    }

    #[tokio::test]
    async fn remaining_time_rounds_down() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        // 1 ms short of the window: 0h 0m remaining.
        store.insert_raw("0xABC", &(NOW - COOLDOWN_MS + 1).to_string()).await;

        let err = checker(store)
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Try again after 0 hours and 0 minutes.");
    }

    #[test]
    fn cooldown_message_splits_hours_and_minutes() {
        let remaining_ms = 5 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59_999;
        let err = EligibilityError::Cooldown { remaining_ms };
        assert_eq!(err.to_string(), "Try again after 5 hours and 59 minutes.");
    }

    #[tokio::test]
    async fn future_timestamp_extends_cooldown() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", &(NOW + MS_PER_HOUR).to_string()).await;

        let err = checker(store)
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Try again after 25 hours and 0 minutes.");
    }

    #[tokio::test]
    async fn malformed_timestamp_allows_claim() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", "not-a-number").await;

        checker(store.clone())
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap();

        assert_eq!(store.get(&address).await, Some(ClaimRecord::at(NOW)));
    }

    #[tokio::test]
    async fn out_of_range_timestamp_allows_claim() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", &i64::MIN.to_string()).await;

        checker(store.clone())
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap();

        assert_eq!(store.get(&address).await, Some(ClaimRecord::at(NOW)));
    }

    #[tokio::test]
    async fn far_future_timestamp_does_not_overflow() {
        let store = Arc::new(InMemoryRecordStore::new());
        let address = WalletAddress::from("0xABC");
        store.insert_raw("0xABC", &i64::MAX.to_string()).await;

        let err = checker(store)
            .check_eligibility_at(&address, NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, EligibilityError::Cooldown { remaining_ms } if remaining_ms > COOLDOWN_MS));
    }

    /// Store whose reads or writes fail.
    struct BrokenStore {
        fail_reads: bool,
    }

    #[async_trait]
    impl ClaimRecordStore for BrokenStore {
        async fn read_record(
            &self,
            _address: &WalletAddress,
        ) -> Result<Option<ClaimRecord>, RecordStoreError> {
            if self.fail_reads {
                Err(RecordStoreError::Status(503))
            } else {
                Ok(None)
            }
        }

        async fn write_record(
            &self,
            _address: &WalletAddress,
            _claimed_at_ms: i64,
        ) -> Result<(), RecordStoreError> {
            Err(RecordStoreError::Request("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn read_failure_is_check_failed() {
        let checker = EligibilityChecker::new(Arc::new(BrokenStore { fail_reads: true }));
        let err = checker
            .check_eligibility_at(&"0xABC".into(), NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, EligibilityError::CheckFailed(_)));
        assert_eq!(err.to_string(), "Failed to check claim eligibility");
    }

    #[tokio::test]
    async fn write_failure_is_set_validity_failed() {
        let checker = EligibilityChecker::new(Arc::new(BrokenStore { fail_reads: false }));
        let err = checker
            .check_eligibility_at(&"0xABC".into(), NOW)
            .await
            .unwrap_err();

        assert!(matches!(err, EligibilityError::SetValidityFailed(_)));
        assert_eq!(err.to_string(), "Failed to set claim validity");
    }

    /// In-memory store that yields between read and write so requests interleave.
    struct SlowStore {
        inner: InMemoryRecordStore,
    }

    #[async_trait]
    impl ClaimRecordStore for SlowStore {
        async fn read_record(
            &self,
            address: &WalletAddress,
        ) -> Result<Option<ClaimRecord>, RecordStoreError> {
            let record = self.inner.read_record(address).await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            record
        }

        async fn write_record(
            &self,
            address: &WalletAddress,
            claimed_at_ms: i64,
        ) -> Result<(), RecordStoreError> {
            self.inner.write_record(address, claimed_at_ms).await
        }
    }

    #[tokio::test]
    async fn concurrent_claims_for_one_address_admit_one() {
        let checker = EligibilityChecker::new(Arc::new(SlowStore {
            inner: InMemoryRecordStore::new(),
        }));
        let address = WalletAddress::from("0xABC");

        let (a, b) = tokio::join!(
            checker.check_eligibility_at(&address, NOW),
            checker.check_eligibility_at(&address, NOW),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        assert_eq!(checker.tracked_addresses(), 0);
    }

    #[tokio::test]
    async fn different_addresses_do_not_block_each_other() {
        let checker = EligibilityChecker::new(Arc::new(SlowStore {
            inner: InMemoryRecordStore::new(),
        }));

        let (first, second) = (WalletAddress::from("0xAAA"), WalletAddress::from("0xBBB"));

        let (a, b) = tokio::join!(
            checker.check_eligibility_at(&first, NOW),
            checker.check_eligibility_at(&second, NOW),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(checker.tracked_addresses(), 0);
    }
}
