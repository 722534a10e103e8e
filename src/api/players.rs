use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, AppState};
use crate::db::models::{NewPlayer, Player, PlayerUpdate};

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub sport: Option<String>,
}

fn player_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Player not found: {}", id))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

/// GET /api/players?sport=basketball
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let sport = params.sport.as_deref().filter(|s| !s.is_empty());
    Ok(Json(state.db.list_players(sport)?))
}

/// GET /api/players/:id
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    state
        .db
        .get_player(&id)?
        .map(Json)
        .ok_or_else(|| player_not_found(&id))
}

/// POST /api/players
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let new = body(payload)?;
    new.validate().map_err(ApiError::BadRequest)?;
    let player = state.db.insert_player(&new)?;
    info!("Recorded player {} ({}) id={}", player.name, player.sport, player.id);
    Ok((StatusCode::CREATED, Json(player)))
}

/// PATCH /api/players/:id
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerUpdate>, JsonRejection>,
) -> Result<Json<Player>, ApiError> {
    let update = body(payload)?;
    update.validate().map_err(ApiError::BadRequest)?;
    state
        .db
        .update_player(&id, &update)?
        .map(Json)
        .ok_or_else(|| player_not_found(&id))
}

/// DELETE /api/players/:id
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.db.delete_player(&id)? {
        info!("Deleted player {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(player_not_found(&id))
    }
}
