use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use chrono::NaiveDate;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::calendar_overview::inbound::http as calendar_http;
use crate::modules::tracking::use_cases::manage_projects::inbound::http as projects_http;
use crate::modules::tracking::use_cases::manage_time_entries::inbound::http as entries_http;
use crate::modules::tracking::use_cases::render_invoice::inbound::http as invoice_http;
use crate::modules::tracking::use_cases::track_time::inbound::http as timer_http;
use crate::modules::tracking::use_cases::weekly_report::inbound::http as report_http;
use crate::shell::graphql::{self, AppSchema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema: AppSchema = graphql::schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/api/clients", get(projects_http::list_clients))
        .route(
            "/api/projects",
            get(projects_http::list).post(projects_http::create),
        )
        .route("/api/projects/summary", get(report_http::project_summaries))
        .route(
            "/api/projects/{id}",
            put(projects_http::update).delete(projects_http::delete),
        )
        .route("/api/projects/{id}/rate", patch(projects_http::update_rate))
        .route(
            "/api/entries",
            get(entries_http::list).post(entries_http::record),
        )
        .route(
            "/api/entries/{id}",
            put(entries_http::edit).delete(entries_http::delete),
        )
        .route(
            "/api/days/{date}/entries",
            get(calendar_http::day).post(entries_http::add_on_day),
        )
        .route("/api/calendar/{year}/{month}", get(calendar_http::month))
        .route(
            "/api/timer/active",
            get(timer_http::active).delete(timer_http::clear),
        )
        .route("/api/timer/start", post(timer_http::start))
        .route("/api/timer/stop", post(timer_http::stop))
        .route("/api/reports/weekly", get(report_http::weekly_report))
        .route(
            "/api/reports/weekly/{week}/invoice",
            get(invoice_http::download),
        )
        .route("/gql", get(graphql::graphiql).post(graphql::graphql))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Maps handler failures onto status codes with a JSON `{ "error": .. }` body.
pub fn error_response(err: ApplicationError) -> Response {
    let status = match &err {
        ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
        ApplicationError::StoreUnavailable(source) => {
            tracing::error!(error = %source, "tracker store failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Path segments naming a day use `YYYY-MM-DD`.
pub fn parse_day(date: &str) -> Result<NaiveDate, ApplicationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ApplicationError::Validation(format!("{date} is not a YYYY-MM-DD date")))
}
