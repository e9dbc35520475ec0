//! `/players/*` handlers (spec.md §6): registration and stats lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use unquote_api_types::{RegisterResponse, StatsResponse};
use unquote_store::{FindPlayer, RegisterPlayer, Stats};

use crate::app_state::AppState;
use crate::responses::Error;

pub async fn register(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let player = state
        .store
        .register_player()
        .await
        .map_err(|e| Error::internal(e.to_string()))?;

    Ok(Json(RegisterResponse {
        claim_code: player.claim_code,
    }))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(claim_code): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let player = state
        .store
        .find_player(&claim_code)
        .await
        .map_err(|e| Error::internal(e.to_string()))?
        .ok_or_else(|| Error::not_found(format!("unknown claim code {claim_code:?}")))?;

    let stats = state
        .store
        .stats(&player.id)
        .await
        .map_err(|e| Error::internal(e.to_string()))?;

    Ok(Json(StatsResponse {
        solved: stats.solved,
        median_seconds: stats.median_seconds,
        current_streak: stats.current_streak,
    }))
}
