// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the external claim record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ClaimRecord, ClaimRecordStore, RecordStoreError};
use crate::models::WalletAddress;

/// Request timeout for record store calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `{ "Item": { "lastClaimTime": { "S": "..." } } }`
#[derive(Debug, Deserialize)]
struct StoredItem {
    #[serde(rename = "lastClaimTime")]
    last_claim_time: StringAttribute,
}

#[derive(Debug, Deserialize)]
struct StringAttribute {
    #[serde(rename = "S")]
    s: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteRecordBody<'a> {
    wallet_address: &'a str,
    last_claim_time: String,
}

/// Claim record store reached over HTTP. One URL serves both reads and writes.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    url: Url,
    http: Client,
}

impl HttpRecordStore {
    pub fn new(url: Url) -> Result<Self, RecordStoreError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| RecordStoreError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { url, http })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ClaimRecordStore for HttpRecordStore {
    async fn read_record(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<ClaimRecord>, RecordStoreError> {
        let response = self
            .http
            .get(self.url.clone())
            .query(&[("walletAddress", address.as_str())])
            .send()
            .await
            .map_err(|e| RecordStoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RecordStoreError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RecordStoreError::Request(e.to_string()))?;

        let record = parse_read_response(&bytes)?;
        debug!(wallet_address = %address, found = record.is_some(), "Read claim record");
        Ok(record)
    }

    async fn write_record(
        &self,
        address: &WalletAddress,
        claimed_at_ms: i64,
    ) -> Result<(), RecordStoreError> {
        let body = WriteRecordBody {
            wallet_address: address.as_str(),
            last_claim_time: claimed_at_ms.to_string(),
        };

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RecordStoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RecordStoreError::Status(response.status().as_u16()));
        }

        debug!(wallet_address = %address, claimed_at_ms, "Wrote claim record");
        Ok(())
    }
}

/// Decode a read response. An empty body, a non-object body, or a missing or
/// null `Item` all mean "no record".
fn parse_read_response(bytes: &[u8]) -> Result<Option<ClaimRecord>, RecordStoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| RecordStoreError::InvalidResponse(e.to_string()))?;

    let item = match body.get("Item") {
        None | Some(Value::Null) => return Ok(None),
        Some(item) => item.clone(),
    };

    let item: StoredItem = serde_json::from_value(item)
        .map_err(|e| RecordStoreError::InvalidResponse(format!("malformed Item: {e}")))?;

    Ok(Some(ClaimRecord {
        last_claim_time: item.last_claim_time.s,
    }))
}
