// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::{
    blockchain::TransferError,
    eligibility::EligibilityError,
    models::{FieldError, ValidationErrorBody},
};

/// Message for every 500 response.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Everything that can end a claim request without a payout.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ClaimError {
    fn into_response(self) -> Response {
        match self {
            ClaimError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody { errors }),
            )
                .into_response(),
            ClaimError::Eligibility(e) => ApiError::forbidden(e.to_string()).into_response(),
            ClaimError::Transfer(e) => ApiError::forbidden(e.to_string()).into_response(),
            ClaimError::Internal(detail) => {
                error!(error = %detail, "Unexpected error while handling claim");
                ApiError::internal().into_response()
            }
        }
    }
}
