// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the faucet API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Field names are camelCase on the wire.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps the raw address string submitted by the
//! caller. It is not format-checked here: an address the chain rejects
//! surfaces as a transfer error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::blockchain::TransferResult;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Recipient wallet address as submitted by the caller.
///
/// # Example
///
/// ```rust,ignore
/// let addr = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Claim Models
// =============================================================================

/// Request to claim the faucet payout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    /// Address that should receive the tokens.
    pub wallet_address: WalletAddress,
}

/// Name of the only validated body field.
pub const WALLET_ADDRESS_FIELD: &str = "walletAddress";

const INVALID_VALUE: &str = "Invalid value";

impl ClaimRequest {
    /// Validate a raw JSON body.
    ///
    /// `walletAddress` must be present, a string, and non-empty. Each failed
    /// check contributes one [`FieldError`], so a missing field reports two.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let value = body.get(WALLET_ADDRESS_FIELD);
        let mut errors = Vec::new();

        match value {
            Some(Value::String(address)) if !address.is_empty() => {
                return Ok(Self {
                    wallet_address: WalletAddress(address.clone()),
                });
            }
            Some(Value::String(_)) => {}
            _ => errors.push(FieldError::body(WALLET_ADDRESS_FIELD, value.cloned())),
        }

        let is_empty = match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(fields)) => fields.is_empty(),
            Some(_) => false,
        };
        if is_empty {
            errors.push(FieldError::body(WALLET_ADDRESS_FIELD, value.cloned()));
        }

        Err(errors)
    }
}

/// One failed validation check on a request field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FieldError {
    /// Always `"field"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending value, absent when the field was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    /// Human-readable description.
    pub msg: String,
    /// Field name.
    pub path: String,
    /// Where the field was read from.
    pub location: String,
}

impl FieldError {
    fn body(path: &str, value: Option<Value>) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: INVALID_VALUE.to_string(),
            path: path.to_string(),
            location: "body".to_string(),
        }
    }
}

/// Body of a 400 response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// Successful claim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClaimResponse {
    /// Always `"Transaction successful"`.
    pub message: String,
    /// The submitted transfer.
    pub result: TransferResult,
}

impl ClaimResponse {
    pub fn success(result: TransferResult) -> Self {
        Self {
            message: "Transaction successful".to_string(),
            result,
        }
    }
}

// =============================================================================
// Faucet Info
// =============================================================================

/// Public description of the faucet payout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaucetInfo {
    /// Network name.
    pub network: String,
    /// Chain ID of the network.
    pub chain_id: u64,
    /// Address the payouts are sent from.
    pub admin_address: String,
    /// Payout per claim in base units.
    pub amount: String,
    /// Hours an address must wait between claims.
    pub cooldown_hours: u64,
}
