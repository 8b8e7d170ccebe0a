//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::PlayersDebugDto, ui::state::AppState};

/// Debug endpoint to get the current state of every player
pub async fn debug_players(State(state): State<Arc<AppState>>) -> Json<PlayersDebugDto> {
    let snapshot = state.get_players_usecase.execute().await;
    Json(snapshot.into())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
