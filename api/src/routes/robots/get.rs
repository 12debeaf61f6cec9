use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::robot::Model as RobotModel;
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct RobotListEntry {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub status: String,
    pub battery: i32,
    pub created_at: String,
    pub sensor_count: u64,
}

/// GET /api/robots
///
/// Lists all robots owned by the authenticated user, each annotated with its
/// recorded sensor reading count.
///
/// ### Responses
/// - `200 OK` with an array of robots.
/// - `500 Internal Server Error` on database failure.
pub async fn list_robots(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let robots = match RobotModel::list_for_user(db, claims.sub).await {
        Ok(robots) => robots,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<RobotListEntry>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut entries = Vec::with_capacity(robots.len());
    for robot in robots {
        let sensor_count = match robot.sensor_count(db).await {
            Ok(count) => count,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<RobotListEntry>>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        };
        entries.push(RobotListEntry {
            id: robot.id,
            name: robot.name,
            model: robot.model,
            status: robot.status,
            battery: robot.battery,
            created_at: robot.created_at.format("%Y-%m-%d %H:%M").to_string(),
            sensor_count,
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(entries, "Robots retrieved")),
    )
}
