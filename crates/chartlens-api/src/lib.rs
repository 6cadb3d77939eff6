//! chartlens-api - HTTP API server for chartlens.
//!
//! The router is built here so integration tests can drive it directly with
//! `tower::ServiceExt::oneshot`; `main.rs` only wires configuration and the
//! real Gemini backend.

pub mod handlers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use chartlens_core::{defaults, AppConfig};
use chartlens_inference::ChartAnalyzer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration, read-only after construction.
    pub config: Arc<AppConfig>,
    /// Analysis entry point (real fallback client, or scripted in tests).
    pub analyzer: Arc<dyn ChartAnalyzer>,
}

/// Build the application router.
///
/// CORS is fully open: the expected caller is a local browser extension,
/// which posts from an arbitrary extension origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::max(defaults::MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_UPLOAD_BYTES))
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// HTTP-level errors. Handled analysis failures are not errors here: they
/// ride a 200 response with the failure text in `result`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "detail": message,
        }));

        (status, body).into_response()
    }
}
