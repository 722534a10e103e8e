use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use super::{ApiError, AppState};
use crate::compare::{compare_players, CompareError, CompareRequest, ComparisonResult};

/// POST /api/compare
///
/// A body that fails to parse counts as a validation failure, so every
/// error reaches the client through the same `{error}` envelope.
pub async fn compare_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        CompareError::Validation(format!("Invalid request body: {}", e.body_text()))
    })?;
    let pair = request.validate()?;
    debug!("Comparing {} vs {}", pair.player1_id, pair.player2_id);

    let result = compare_players(&state.db, &pair).await?;
    Ok(Json(result))
}
