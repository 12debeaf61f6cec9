use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::robot::Model as RobotModel;
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateRobotRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub battery: Option<i32>,
}

/// PUT /api/robots/{robot_id}
///
/// Partial update: only the fields present in the payload are overwritten.
///
/// ### Responses
/// - `200 OK` on success.
/// - `404 Not Found` when the robot is not owned by the caller.
/// - `500 Internal Server Error` on database failure.
pub async fn update_robot(
    State(state): State<AppState>,
    Path(robot_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateRobotRequest>,
) -> impl IntoResponse {
    match RobotModel::update_for_user(
        state.db(),
        robot_id,
        claims.sub,
        req.name,
        req.model,
        req.status,
        req.battery,
    )
    .await
    {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Robot updated")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Robot not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
