// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::any::Any;

use axum::{
    http::HeaderName,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::TransferResult,
    error::ApiError,
    models::{
        ClaimRequest, ClaimResponse, FaucetInfo, FieldError, ValidationErrorBody, WalletAddress,
    },
    state::AppState,
};

pub mod claim;
pub mod health;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/claim", post(claim::claim))
        .route("/faucet", get(claim::faucet_info))
        .route("/health", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(CorsLayer::permissive()),
        )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");
    ApiError::internal().into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(claim::claim, claim::faucet_info, health::liveness),
    components(
        schemas(
            ClaimRequest,
            ClaimResponse,
            TransferResult,
            FaucetInfo,
            FieldError,
            ValidationErrorBody,
            WalletAddress,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Faucet", description = "Testnet token claims"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{blockchain::FaucetWallet, blockchain::FAUCET_NETWORK, records::InMemoryRecordStore};

    fn test_state() -> AppState {
        let wallet = FaucetWallet::from_private_key(
            FAUCET_NETWORK,
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        AppState::new(Arc::new(InMemoryRecordStore::new()), Arc::new(wallet))
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(test_state());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_is_ok_and_carries_request_id() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }

    #[test]
    fn openapi_lists_claim_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/claim"));
        assert!(doc.paths.paths.contains_key("/faucet"));
    }

    #[tokio::test]
    async fn panic_response_is_generic_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"error":"An unexpected error occurred"}"#);
    }
}
