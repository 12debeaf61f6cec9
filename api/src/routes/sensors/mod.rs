use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::get_sensor_data;

/// Builds the `/sensors` route group (authenticated).
pub fn sensor_routes() -> Router<AppState> {
    Router::new().route("/{robot_id}", get(get_sensor_data))
}
