// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration: paying out from the faucet's admin wallet.
//!
//! This module provides:
//! - Admin key loading (hex or PEM)
//! - Native-token transfers on the fixed faucet network
//! - The [`TokenTransfer`] seam the API depends on

use async_trait::async_trait;

use crate::models::WalletAddress;

pub mod client;
pub mod signing;
pub mod types;

pub use client::FaucetWallet;
pub use types::*;

/// Sends payouts from the admin wallet.
#[async_trait]
pub trait TokenTransfer: Send + Sync {
    /// Send `amount` base units to `recipient`. No retry.
    async fn transfer(
        &self,
        recipient: &WalletAddress,
        amount: u64,
    ) -> Result<TransferResult, TransferError>;

    /// Checksummed address the payouts come from.
    fn admin_address(&self) -> String;

    fn network(&self) -> &NetworkConfig;
}
