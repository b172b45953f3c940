// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process claim record store.
//!
//! Used by the test suite and by callers that build an `AppState` by hand.
//! The faucet binary always talks to the HTTP store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ClaimRecord, ClaimRecordStore, RecordStoreError};
use crate::models::WalletAddress;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<WalletAddress, ClaimRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with an arbitrary stored value.
    pub async fn insert_raw(&self, address: impl Into<WalletAddress>, last_claim_time: &str) {
        self.records.write().await.insert(
            address.into(),
            ClaimRecord {
                last_claim_time: last_claim_time.to_string(),
            },
        );
    }

    pub async fn get(&self, address: &WalletAddress) -> Option<ClaimRecord> {
        self.records.read().await.get(address).cloned()
    }
}

#[async_trait]
impl ClaimRecordStore for InMemoryRecordStore {
    async fn read_record(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<ClaimRecord>, RecordStoreError> {
        Ok(self.get(address).await)
    }

    async fn write_record(
        &self,
        address: &WalletAddress,
        claimed_at_ms: i64,
    ) -> Result<(), RecordStoreError> {
        self.records
            .write()
            .await
            .insert(address.clone(), ClaimRecord::at(claimed_at_ms));
        Ok(())
    }
}
