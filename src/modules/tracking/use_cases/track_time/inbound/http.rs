use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerBody {
    #[serde(default)]
    pub project_id: String,
}

/// The running timer with its elapsed time, or `null` when idle.
pub async fn active(State(state): State<AppState>) -> impl IntoResponse {
    match state.timer.active().await {
        Ok(status) => Json(status).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn start(
    State(state): State<AppState>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.timer.start(&body.project_id).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => error_response(err),
    }
}

/// Responds with the recorded entry, or `null` when nothing was running.
pub async fn stop(State(state): State<AppState>) -> impl IntoResponse {
    match state.timer.stop().await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    match state.timer.clear().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
