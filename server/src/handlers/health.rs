use axum::{extract::State, response::IntoResponse, Json};

use unquote_api_types::{DatabaseHealth, DatabaseStatus, LiveHealthResponse, ReadyHealthResponse};
use unquote_store::{CheckHealth, HealthStatus};

use crate::app_state::AppState;

pub async fn live() -> impl IntoResponse {
    Json(LiveHealthResponse::default())
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database = if !state.database_configured {
        DatabaseHealth {
            status: DatabaseStatus::Unconfigured,
            error: None,
        }
    } else {
        match state.store.check_health().await {
            Ok(HealthStatus::Connected) => DatabaseHealth {
                status: DatabaseStatus::Connected,
                error: None,
            },
            Ok(HealthStatus::Unconfigured) => DatabaseHealth {
                status: DatabaseStatus::Unconfigured,
                error: None,
            },
            Err(e) => DatabaseHealth {
                status: DatabaseStatus::Error,
                error: Some(e.to_string()),
            },
        }
    };

    Json(ReadyHealthResponse {
        status: "ok",
        database,
    })
}
