//! `/game/*` handlers (spec.md §6): today's puzzle, a puzzle by date,
//! and submission checking.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};

use unquote_api_types::{CheckRequest, CheckResponse, PuzzlePayload};
use unquote_engine::error::EngineError;
use unquote_engine::game_id;
use unquote_engine::solution;
use unquote_store::RecordSession;

use crate::app_state::AppState;
use crate::responses::Error;

pub async fn today(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let date = Utc::now().date_naive();
    generate_payload(&state, date)
}

pub async fn by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| Error::invalid_input(format!("invalid date {date:?}, expected YYYY-MM-DD")))?;

    let bounds_low = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let bounds_high = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    if parsed < bounds_low || parsed > bounds_high {
        return Err(Error::not_found(format!("{date} is out of range")));
    }

    generate_payload(&state, parsed)
}

fn generate_payload(state: &AppState, date: NaiveDate) -> Result<Json<PuzzlePayload>, Error> {
    match state.generate_for_date(date) {
        Ok(generated) => Ok(Json(PuzzlePayload::from(generated.puzzle))),
        Err(EngineError::NotFound(msg)) => Err(Error::unavailable(msg)),
        Err(EngineError::InvalidInput(msg)) => Err(Error::unavailable(msg)),
    }
}

pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CheckRequest>,
) -> Result<impl IntoResponse, Error> {
    let date = game_id::decode(&id).ok_or_else(|| Error::not_found(format!("unknown game id {id:?}")))?;

    let generated = state
        .generate_for_date(date)
        .map_err(|e| Error::internal(e.to_string()))?;

    let correct = solution::check(&request.solution, &generated.plaintext)
        .map_err(|e| Error::invalid_input(e.to_string()))?;

    let already_recorded = if correct {
        if let Some(claim_code) = request.claim_code.as_deref() {
            record_session_if_possible(&state, claim_code, &id, request.completion_time).await?
        } else {
            None
        }
    } else {
        None
    };

    Ok(Json(CheckResponse {
        correct,
        already_recorded,
    }))
}

async fn record_session_if_possible(
    state: &AppState,
    claim_code: &str,
    game_id: &str,
    completion_time: Option<u64>,
) -> Result<Option<bool>, Error> {
    use unquote_store::FindPlayer;

    let player = state
        .store
        .find_player(claim_code)
        .await
        .map_err(|e| Error::internal(e.to_string()))?;

    let Some(player) = player else {
        return Ok(None);
    };

    let completion_time = completion_time.unwrap_or(0);
    let outcome = state
        .store
        .record_session(&player.id, game_id, completion_time)
        .await
        .map_err(|e| Error::internal(e.to_string()))?;

    Ok(Some(outcome.already_recorded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_bounds_match_the_game_id_codec() {
        let low = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let high = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        assert!(game_id::decode(&game_id::encode(low)).is_some());
        assert!(game_id::decode(&game_id::encode(high)).is_some());
    }
}
