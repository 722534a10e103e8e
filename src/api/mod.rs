//! HTTP surface: the comparison endpoint plus player record CRUD.

pub mod compare;
pub mod players;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::compare::CompareError;
use crate::db::{Database, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the Axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/compare", post(compare::compare_handler))
        .route(
            "/api/players",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/api/players/:id",
            get(players::get_player)
                .patch(players::update_player)
                .delete(players::delete_player),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// API error types. Every variant renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Comparison failures are all reported as 500, whatever the cause.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(e) => {
                error!("Store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Compare(e) => {
                warn!("Comparison failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
