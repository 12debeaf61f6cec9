//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration and login (public), `/auth/me` (authenticated)
//! - `/robots` → Robot CRUD and bulk sensor ingestion (authenticated)
//! - `/sensors` → Recent readings per robot (authenticated)
//! - `/stats` → Fleet counters (authenticated)
//! - `/simulate` → Synthetic reading generation (authenticated)
//! - `/reports` → Aggregated summaries and spreadsheet export (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, health::health_routes, reports::report_routes, robots::robot_routes,
    sensors::sensor_routes,
};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

pub mod auth;
pub mod common;
pub mod health;
pub mod reports;
pub mod robots;
pub mod sensors;
pub mod simulate;
pub mod stats;

/// Builds the complete application router for all HTTP endpoints.
///
/// Everything except `/health` and the login/register endpoints is gated by
/// `allow_authenticated`; handlers receive the caller's identity through the
/// `AuthUser` request extension and scope every query to it.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/robots",
            robot_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/sensors",
            sensor_routes().route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/stats",
            get(stats::get_stats).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/simulate/{robot_id}",
            post(simulate::simulate_reading).route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/reports",
            report_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
