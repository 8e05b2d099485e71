use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::tracking::use_cases::manage_time_entries::command::{
    AddManualEntry, EditTimeEntry, RecordTimeEntry,
};
use crate::shell::http::{error_response, parse_day};
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryBody {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.entries.list().await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn record(
    State(state): State<AppState>,
    body: Result<Json<RecordTimeEntry>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.entries.record(body).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn add_on_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    body: Result<Json<DayEntryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let date = match parse_day(&date) {
        Ok(d) => d,
        Err(err) => return error_response(err),
    };

    let command = AddManualEntry {
        project_id: body.project_id,
        date,
        hours: body.hours,
        minutes: body.minutes,
        description: body.description,
    };
    match state.entries.add_manual(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EditTimeEntry>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.entries.edit(&id, body).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.entries.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
