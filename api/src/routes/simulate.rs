use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::robot::Model as RobotModel;
use db::models::sensor_data::Model as SensorDataModel;
use rand::Rng;
use sea_orm::TransactionTrait;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::round_to;

/// One synthetic telemetry sample plus the battery cost of taking it.
struct SimulatedReading {
    temperature: f64,
    humidity: f64,
    speed: f64,
    battery_drain: i32,
}

fn sample_reading() -> SimulatedReading {
    // RNG handle is not Send; sample everything before any await point.
    let mut rng = rand::thread_rng();
    SimulatedReading {
        temperature: round_to(rng.gen_range(20.0..=30.0), 1),
        humidity: round_to(rng.gen_range(40.0..=60.0), 1),
        speed: round_to(rng.gen_range(0.0..=5.0), 2),
        battery_drain: rng.gen_range(1..=5),
    }
}

/// POST /api/simulate/{robot_id}
///
/// Generates one synthetic sensor reading for the robot and drains its
/// battery by a random 1-5 points, floored at zero.
///
/// ### Responses
/// - `200 OK` on success.
/// - `404 Not Found` when the robot is not owned by the caller.
/// - `500 Internal Server Error` on database failure (nothing persisted).
pub async fn simulate_reading(
    State(state): State<AppState>,
    Path(robot_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let robot = match RobotModel::find_by_id_for_user(db, robot_id, claims.sub).await {
        Ok(Some(robot)) => robot,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("Robot not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
            );
        }
    };

    let reading = sample_reading();

    let result = async {
        let txn = db.begin().await?;
        SensorDataModel::create(
            &txn,
            robot.id,
            reading.temperature,
            reading.humidity,
            reading.speed,
        )
        .await?;
        robot.drain_battery(&txn, reading.battery_drain).await?;
        txn.commit().await
    }
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Sensor data simulated")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
