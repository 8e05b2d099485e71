use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::shell::http::{error_response, parse_day};
use crate::shell::state::AppState;

pub async fn month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> impl IntoResponse {
    match state.calendar.month(year, month).await {
        Ok(overview) => Json(overview).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn day(State(state): State<AppState>, Path(date): Path<String>) -> impl IntoResponse {
    let date = match parse_day(&date) {
        Ok(d) => d,
        Err(err) => return error_response(err),
    };

    match state.calendar.day(date).await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}
