// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Avalanche Fuji Testnet configuration.
pub const AVAX_FUJI: NetworkConfig = NetworkConfig {
    name: "Avalanche Fuji Testnet",
    chain_id: 43113,
    rpc_url: "https://api.avax-test.network/ext/bc/C/rpc",
    explorer_url: "https://testnet.snowtrace.io",
};

/// Network every payout is sent on.
pub const FAUCET_NETWORK: NetworkConfig = AVAX_FUJI;

/// Payout per claim, in base units (wei).
pub const FAUCET_AMOUNT: u64 = 5_000_000;

/// A submitted payout transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    /// Transaction hash
    pub tx_hash: String,
    /// Block explorer URL for the transaction
    pub explorer_url: String,
    /// Recipient address
    pub recipient: String,
    /// Amount sent in base units
    pub amount: String,
    /// Network name
    pub network: String,
}

/// Errors that can occur while paying out.
///
/// The `Display` text is returned to the caller verbatim.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
