use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::robot::Model as RobotModel;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;

/// DELETE /api/robots/{robot_id}
///
/// Deletes a robot and all of its recorded sensor readings.
///
/// ### Responses
/// - `200 OK` on success.
/// - `404 Not Found` when the robot is not owned by the caller.
/// - `500 Internal Server Error` on database failure.
pub async fn delete_robot(
    State(state): State<AppState>,
    Path(robot_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match RobotModel::delete_for_user(state.db(), robot_id, claims.sub).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Robot deleted")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Robot not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
