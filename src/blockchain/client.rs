// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin wallet client that signs and broadcasts payouts.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use tracing::info;

use super::signing::admin_signer;
use super::types::{NetworkConfig, TransferError, TransferResult};
use super::TokenTransfer;
use crate::models::WalletAddress;

/// Signing HTTP provider (recommended fillers plus the admin wallet).
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Fallback base fee when the latest block carries none (25 gwei).
const DEFAULT_BASE_FEE: u128 = 25_000_000_000;

/// Priority fee for Avalanche C-Chain (1.5 gwei).
const PRIORITY_FEE: u128 = 1_500_000_000;

/// The faucet's admin wallet on a fixed network.
pub struct FaucetWallet {
    network: NetworkConfig,
    admin_address: Address,
    provider: SigningProvider,
}

impl FaucetWallet {
    /// Create a wallet client for `network` signing with `signer`.
    ///
    /// Connecting is lazy; no RPC call is made until the first payout.
    pub fn new(network: NetworkConfig, signer: PrivateKeySigner) -> Result<Self, TransferError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| TransferError::InvalidRpcUrl(e.to_string()))?;

        let admin_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url);

        Ok(Self {
            network,
            admin_address,
            provider,
        })
    }

    /// Create a wallet client from hex or PEM key material.
    pub fn from_private_key(network: NetworkConfig, key: &str) -> Result<Self, TransferError> {
        Self::new(network, admin_signer(key)?)
    }

    /// Current fees as `(max_fee_per_gas, max_priority_fee_per_gas)`.
    async fn get_gas_prices(&self) -> Result<(u128, u128), TransferError> {
        let block = self
            .provider
            .get_block_by_number(alloy::eips::BlockNumberOrTag::Latest)
            .await
            .map_err(|e| TransferError::RpcError(format!("Failed to get block: {}", e)))?
            .ok_or_else(|| TransferError::RpcError("No latest block".to_string()))?;

        let base_fee: u128 = block
            .header
            .base_fee_per_gas
            .map(|f| f as u128)
            .unwrap_or(DEFAULT_BASE_FEE);

        // Max fee = 2 * base_fee + priority_fee (allows for base fee increase)
        let max_fee = base_fee.saturating_mul(2).saturating_add(PRIORITY_FEE);

        Ok((max_fee, PRIORITY_FEE))
    }
}

#[async_trait]
impl TokenTransfer for FaucetWallet {
    async fn transfer(
        &self,
        recipient: &WalletAddress,
        amount: u64,
    ) -> Result<TransferResult, TransferError> {
        let to_addr = Address::from_str(recipient.as_str())
            .map_err(|e| TransferError::InvalidRecipient(e.to_string()))?;

        let (max_fee_per_gas, priority_fee) = self.get_gas_prices().await?;

        let tx = TransactionRequest::default()
            .to(to_addr)
            .value(U256::from(amount))
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(priority_fee);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| TransferError::TransactionFailed(format!("Failed to send: {}", e)))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        info!(
            tx_hash = %tx_hash,
            recipient = %recipient,
            amount,
            network = self.network.name,
            "Payout submitted"
        );

        Ok(TransferResult {
            explorer_url: format!("{}/tx/{}", self.network.explorer_url, tx_hash),
            tx_hash,
            recipient: recipient.to_string(),
            amount: amount.to_string(),
            network: self.network.name.to_string(),
        })
    }

    fn admin_address(&self) -> String {
        self.admin_address.to_checksum(None)
    }

    fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::FAUCET_NETWORK;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    /// Port 1 on loopback: nothing listens there.
    const DEAD_RPC: NetworkConfig = NetworkConfig {
        name: "Unreachable",
        chain_id: 1337,
        rpc_url: "http://127.0.0.1:1",
        explorer_url: "http://explorer.invalid",
    };

    #[test]
    fn derives_admin_address_from_key() {
        let wallet = FaucetWallet::from_private_key(FAUCET_NETWORK, KEY_ONE).unwrap();
        assert_eq!(
            wallet.admin_address(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(wallet.network().chain_id, 43113);
    }

    #[test]
    fn rejects_bad_rpc_url() {
        let network = NetworkConfig {
            rpc_url: "not a url",
            ..DEAD_RPC
        };
        assert!(matches!(
            FaucetWallet::from_private_key(network, KEY_ONE),
            Err(TransferError::InvalidRpcUrl(_))
        ));
    }

    #[tokio::test]
    async fn invalid_recipient_fails_before_any_rpc_call() {
        let wallet = FaucetWallet::from_private_key(DEAD_RPC, KEY_ONE).unwrap();
        let err = wallet
            .transfer(&"0xABC".into(), 5_000_000)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidRecipient(_)));
    }

    #[tokio::test]
    async fn unreachable_rpc_is_an_rpc_error() {
        let wallet = FaucetWallet::from_private_key(DEAD_RPC, KEY_ONE).unwrap();
        let err = wallet
            .transfer(
                &"0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12".into(),
                5_000_000,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::RpcError(_)));
    }
}
