use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::robot::Model as RobotModel;
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize, Default)]
pub struct FleetStats {
    pub total_robots: usize,
    pub active_robots: usize,
    pub total_sensors: u64,
}

/// GET /api/stats
///
/// Fleet counters for the authenticated user: robot total, robots with
/// status "active", and total recorded sensor readings.
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let robots = match RobotModel::list_for_user(db, claims.sub).await {
        Ok(robots) => robots,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<FleetStats>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut total_sensors: u64 = 0;
    for robot in &robots {
        match robot.sensor_count(db).await {
            Ok(count) => total_sensors += count,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<FleetStats>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        }
    }

    let stats = FleetStats {
        total_robots: robots.len(),
        active_robots: robots.iter().filter(|r| r.status == "active").count(),
        total_sensors,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(stats, "Stats retrieved")),
    )
}
