use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;

use get::{export_report, get_report_summary};

/// Builds the `/reports` route group (authenticated).
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_report_summary))
        .route("/export", get(export_report))
}
