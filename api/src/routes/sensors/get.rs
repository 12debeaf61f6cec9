use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::robot::Model as RobotModel;
use db::models::sensor_data::Model as SensorDataModel;
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

/// Maximum number of readings returned per request.
const READINGS_LIMIT: u64 = 50;

#[derive(Debug, Serialize)]
pub struct SensorReadingEntry {
    pub temperature: f64,
    pub humidity: f64,
    pub speed: f64,
    pub timestamp: String,
}

/// GET /api/sensors/{robot_id}
///
/// Returns the latest 50 readings for the robot, newest first.
///
/// ### Responses
/// - `200 OK` with an array of readings.
/// - `404 Not Found` when the robot is not owned by the caller.
/// - `500 Internal Server Error` on database failure.
pub async fn get_sensor_data(
    State(state): State<AppState>,
    Path(robot_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    match RobotModel::find_by_id_for_user(db, robot_id, claims.sub).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<SensorReadingEntry>>::error(
                    "Robot not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SensorReadingEntry>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match SensorDataModel::latest_for_robot(db, robot_id, READINGS_LIMIT).await {
        Ok(readings) => {
            let entries: Vec<SensorReadingEntry> = readings
                .into_iter()
                .map(|r| SensorReadingEntry {
                    temperature: r.temperature,
                    humidity: r.humidity,
                    speed: r.speed,
                    timestamp: r.timestamp.format("%H:%M:%S").to_string(),
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(entries, "Sensor data retrieved")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SensorReadingEntry>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
