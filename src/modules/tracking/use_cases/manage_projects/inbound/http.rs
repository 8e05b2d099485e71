use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::tracking::use_cases::manage_projects::command::{CreateProject, UpdateProject};
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRateBody {
    pub hourly_rate: f64,
}

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.projects.list().await {
        Ok(projects) => Json(projects).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    match state.projects.list_clients().await {
        Ok(clients) => Json(clients).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProject>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.projects.create(body).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProject>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.projects.update(&id, body).await {
        Ok(project) => Json(project).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn update_rate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateRateBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.projects.update_rate(&id, body.hourly_rate).await {
        Ok(project) => Json(project).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.projects.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
