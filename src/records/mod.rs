// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Claim Record Store
//!
//! Each wallet address has at most one claim record holding the time of its
//! last successful claim, in milliseconds since the Unix epoch. Records live
//! in an external key-value service; this crate only reads and overwrites
//! them, it never deletes one.
//!
//! ## Wire Format
//!
//! ```text
//! GET  <url>?walletAddress=<address>
//!   -> { "Item"?: { "lastClaimTime": { "S": "<millis>" } } }
//! POST <url>  { "walletAddress": "<address>", "lastClaimTime": "<millis>" }
//! ```
//!
//! The timestamp is kept as the raw string the store returned. Parsing it is
//! the eligibility checker's job, so a malformed value is still a record.

use async_trait::async_trait;

use crate::models::WalletAddress;

pub mod http;
pub mod memory;

pub use http::HttpRecordStore;
pub use memory::InMemoryRecordStore;

/// Last claim of a single address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Milliseconds since epoch, as stored.
    pub last_claim_time: String,
}

impl ClaimRecord {
    pub fn at(claimed_at_ms: i64) -> Self {
        Self {
            last_claim_time: claimed_at_ms.to_string(),
        }
    }

    /// Parsed timestamp, `None` unless the stored value is a whole integer.
    /// Leading digits followed by anything else (`"17.5"`) do not count.
    pub fn last_claim_ms(&self) -> Option<i64> {
        self.last_claim_time.trim().parse().ok()
    }
}

/// Errors talking to the record store.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("Record store request failed: {0}")]
    Request(String),

    #[error("Record store returned HTTP {0}")]
    Status(u16),

    #[error("Record store response was invalid: {0}")]
    InvalidResponse(String),
}

/// Read/write access to claim records.
#[async_trait]
pub trait ClaimRecordStore: Send + Sync {
    /// Fetch the record for `address`, `None` if it has never claimed.
    async fn read_record(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<ClaimRecord>, RecordStoreError>;

    /// Create or overwrite the record for `address`.
    async fn write_record(
        &self,
        address: &WalletAddress,
        claimed_at_ms: i64,
    ) -> Result<(), RecordStoreError>;
}
