// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin key loading.
//!
//! `ADMIN_PRIVATE_KEY` may hold either a raw secp256k1 key as 64 hex
//! characters (optionally `0x`-prefixed) or a PEM document (SEC1 or PKCS#8).
//! PEM values pasted into a single-line environment variable may use literal
//! `\n` sequences for line breaks.

use alloy::signers::local::PrivateKeySigner;
use k256::{ecdsa::SigningKey, pkcs8::DecodePrivateKey, SecretKey};

use super::types::TransferError;

const PEM_PREFIX: &str = "-----BEGIN";

/// Build the admin signer from its configured key material.
pub fn admin_signer(key: &str) -> Result<PrivateKeySigner, TransferError> {
    let key = key.trim();
    if key.starts_with(PEM_PREFIX) {
        let normalized = key.replace("\\n", "\n");
        signer_from_pem(normalized.as_bytes())
    } else {
        signer_from_hex(key)
    }
}

/// Create a signer from a hex private key, with or without `0x`.
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, TransferError> {
    let hex = private_key_hex
        .strip_prefix("0x")
        .unwrap_or(private_key_hex);

    let key_bytes = alloy::hex::decode(hex)
        .map_err(|e| TransferError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| TransferError::InvalidPrivateKey(e.to_string()))
}

/// Decode a SEC1 or PKCS#8 PEM document into a secp256k1 secret key.
pub fn secret_key_from_pem(pem_bytes: &[u8]) -> Result<SecretKey, TransferError> {
    let pem_str = std::str::from_utf8(pem_bytes)
        .map_err(|e| TransferError::InvalidPrivateKey(format!("Invalid UTF-8: {e}")))?;

    let pem = pem::parse(pem_str)
        .map_err(|e| TransferError::InvalidPrivateKey(format!("Invalid PEM: {e}")))?;

    // SEC1 first, then PKCS#8.
    SecretKey::from_sec1_der(pem.contents())
        .or_else(|_| SecretKey::from_pkcs8_der(pem.contents()).map_err(|e| e.to_string()))
        .map_err(|e| TransferError::InvalidPrivateKey(format!("Invalid key format: {e}")))
}

/// Create a signer from a PEM-encoded private key.
pub fn signer_from_pem(pem_bytes: &[u8]) -> Result<PrivateKeySigner, TransferError> {
    let secret_key = secret_key_from_pem(pem_bytes)?;
    Ok(PrivateKeySigner::from_signing_key(SigningKey::from(secret_key)))
}
