// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Faucet - Testnet Token Faucet Service
//!
//! Pays a fixed amount of testnet tokens from an admin wallet to any address
//! that has not claimed in the last 24 hours. Claim times are kept in an
//! external record store reached over HTTP.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Admin wallet and payouts (alloy)
//! - `eligibility` - 24-hour cooldown check
//! - `records` - Claim record store clients

pub mod api;
pub mod blockchain;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod records;
pub mod state;
