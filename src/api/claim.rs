// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Faucet endpoints.
//!
//! A claim runs validate → eligibility → transfer. Once validation passes,
//! the rest runs on its own task so a client hanging up cannot stop it
//! halfway, after the claim record is written but before the payout is sent.
//! The task stays inside the request's span.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn, Instrument, Span};

use crate::{
    blockchain::{TransferResult, FAUCET_AMOUNT},
    eligibility::COOLDOWN_MS,
    error::ClaimError,
    models::{ClaimRequest, ClaimResponse, FaucetInfo, WalletAddress},
    state::AppState,
};

/// Claim the faucet payout.
///
/// Sends the fixed payout to `walletAddress` if it has not claimed in the
/// last 24 hours.
#[utoipa::path(
    post,
    path = "/claim",
    request_body = ClaimRequest,
    tag = "Faucet",
    responses(
        (status = 200, description = "Payout submitted", body = ClaimResponse),
        (status = 400, description = "Invalid request body", body = crate::models::ValidationErrorBody),
        (status = 403, description = "Cooldown active, record store failure, or transfer failure"),
        (status = 500, description = "Unexpected error")
    )
)]
pub async fn claim(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClaimResponse>, ClaimError> {
    // Unreadable bodies validate like an empty one.
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Claim body is not JSON");
            Value::Null
        }
    };

    let request = ClaimRequest::from_json(&body).map_err(ClaimError::Validation)?;
    let address = request.wallet_address;
    info!(wallet_address = %address, "Claim requested");

    let result = tokio::spawn(process_claim(state, address).instrument(Span::current()))
        .await
        .map_err(|e| ClaimError::Internal(format!("claim task failed: {e}")))??;

    Ok(Json(ClaimResponse::success(result)))
}

async fn process_claim(state: AppState, address: WalletAddress) -> Result<TransferResult, ClaimError> {
    state.eligibility.check_eligibility(&address).await?;

    let result = state
        .wallet
        .transfer(&address, FAUCET_AMOUNT)
        .await
        .map_err(|e| {
            // The claim record is already updated at this point.
            warn!(wallet_address = %address, error = %e, "Payout failed after claim was recorded");
            e
        })?;

    info!(wallet_address = %address, tx_hash = %result.tx_hash, "Claim paid out");
    Ok(result)
}

/// Describe the payout.
#[utoipa::path(
    get,
    path = "/faucet",
    tag = "Faucet",
    responses((status = 200, body = FaucetInfo))
)]
pub async fn faucet_info(State(state): State<AppState>) -> Json<FaucetInfo> {
    let network = state.wallet.network();
    Json(FaucetInfo {
        network: network.name.to_string(),
        chain_id: network.chain_id,
        admin_address: state.wallet.admin_address(),
        amount: FAUCET_AMOUNT.to_string(),
        cooldown_hours: (COOLDOWN_MS / 3_600_000) as u64,
    })
}
