use axum::{Json, extract::State, response::IntoResponse};

use crate::shell::http::error_response;
use crate::shell::state::AppState;

/// Week buckets, most recent week first.
pub async fn weekly_report(State(state): State<AppState>) -> impl IntoResponse {
    match state.reports.weekly_report().await {
        Ok(weeks) => Json(weeks).into_response(),
        Err(err) => error_response(err),
    }
}

/// Every project with its live total, the running timer included.
pub async fn project_summaries(State(state): State<AppState>) -> impl IntoResponse {
    match state.reports.project_summaries().await {
        Ok(summaries) => Json(summaries).into_response(),
        Err(err) => error_response(err),
    }
}
