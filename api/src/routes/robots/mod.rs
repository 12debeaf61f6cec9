use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_robot;
use get::list_robots;
use post::{bulk_upload, create_robot, smart_upload, upload_sensors};
use put::update_robot;

/// Builds the `/robots` route group (all authenticated).
pub fn robot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_robots).post(create_robot))
        .route("/bulk-upload", post(bulk_upload))
        .route("/smart-upload", post(smart_upload))
        .route("/{robot_id}/upload-sensors", post(upload_sensors))
        .route("/{robot_id}", put(update_robot).delete(delete_robot))
}
