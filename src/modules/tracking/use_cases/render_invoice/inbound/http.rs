use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};

use crate::modules::tracking::use_cases::render_invoice::invoice::ClientDetails;
use crate::shell::http::{error_response, parse_day};
use crate::shell::state::AppState;

/// Serves the invoice for one week as a downloadable HTML file. Client
/// details come from the query string.
pub async fn download(
    State(state): State<AppState>,
    Path(week): Path<String>,
    Query(client): Query<ClientDetails>,
) -> impl IntoResponse {
    let week_key = match parse_day(&week) {
        Ok(d) => d,
        Err(err) => return error_response(err),
    };

    match state.invoices.render(week_key, &client).await {
        Ok(invoice) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", invoice.file_name),
                ),
            ],
            invoice.html,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
