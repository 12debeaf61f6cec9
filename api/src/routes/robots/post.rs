use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::robot::Model as RobotModel;
use db::models::sensor_data::Model as SensorDataModel;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::robots::common::{group_sensors, reading_values};

#[derive(Debug, Deserialize)]
pub struct CreateRobotRequest {
    pub name: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct CreatedRobot {
    pub id: i64,
}

/// POST /api/robots
///
/// Registers a new robot for the authenticated user with status "active"
/// and a full battery.
///
/// ### Responses
/// - `201 Created` with the new robot's id.
/// - `400 Bad Request` when `name` or `model` is missing.
/// - `500 Internal Server Error` on database failure.
pub async fn create_robot(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateRobotRequest>,
) -> impl IntoResponse {
    let (Some(name), Some(model)) = (req.name, req.model) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CreatedRobot>::error(
                "name and model are required",
            )),
        );
    };

    match RobotModel::create(state.db(), claims.sub, &name, &model).await {
        Ok(robot) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CreatedRobot { id: robot.id },
                "Robot added",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CreatedRobot>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

fn server_error(e: impl std::fmt::Display) -> (StatusCode, Json<ApiResponse<Value>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(format!("Database error: {}", e))),
    )
}

/// POST /api/robots/{robot_id}/upload-sensors
///
/// Bulk upload of sensor readings for a single robot. Entries with a
/// non-numeric temperature/humidity/speed are skipped; the rest of the batch
/// still goes through.
///
/// ### Request Body
/// ```json
/// { "sensors": [ {"temperature": 21.5, "humidity": 48.0, "speed": 1.2} ] }
/// ```
///
/// ### Responses
/// - `200 OK` with the count of readings actually inserted.
/// - `400 Bad Request` when the `sensors` array is missing.
/// - `404 Not Found` when the robot is not owned by the caller.
/// - `500 Internal Server Error` on database failure (whole batch rolled back).
pub async fn upload_sensors(
    State(state): State<AppState>,
    Path(robot_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let db = state.db();

    let robot = match RobotModel::find_by_id_for_user(db, robot_id, claims.sub).await {
        Ok(Some(robot)) => robot,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Robot not found")),
            );
        }
        Err(e) => return server_error(e),
    };

    let Some(entries) = body.get("sensors").and_then(Value::as_array) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "JSON format invalid. \"sensors\" array is required.",
            )),
        );
    };

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => return server_error(e),
    };

    let mut count: u64 = 0;
    for entry in entries {
        let Ok((temperature, humidity, speed)) = reading_values(entry) else {
            continue;
        };
        if let Err(e) =
            SensorDataModel::create(&txn, robot.id, temperature, humidity, speed).await
        {
            let _ = txn.rollback().await;
            return server_error(e);
        }
        count += 1;
    }

    if let Err(e) = txn.commit().await {
        return server_error(e);
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({ "count": count }),
            format!("{} sensor readings uploaded", count),
        )),
    )
}

/// POST /api/robots/bulk-upload
///
/// Multi-robot bulk upload keyed by robot id. Each group is processed
/// independently: a missing `robot_id` or a robot the caller does not own
/// yields a per-group error entry without failing the request. Readings with
/// non-numeric values are skipped like in the single-robot upload. All
/// inserts are committed once at the end.
///
/// ### Request Body
/// ```json
/// { "robots": [ { "robot_id": 1, "sensors": [ ... ] } ] }
/// ```
///
/// ### Responses
/// - `200 OK` with `{total_sensors, results}`; inspect per-group status.
/// - `400 Bad Request` when the `robots` array is missing.
/// - `500 Internal Server Error` on database failure (everything rolled back).
pub async fn bulk_upload(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let db = state.db();

    let Some(groups) = body.get("robots").and_then(Value::as_array) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "JSON format invalid. \"robots\" array is required.",
            )),
        );
    };

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => return server_error(e),
    };

    let mut results: Vec<Value> = Vec::with_capacity(groups.len());
    let mut total_sensors: u64 = 0;

    for group in groups {
        let Some(robot_id) = group.get("robot_id").and_then(Value::as_i64) else {
            results.push(json!({
                "status": "error",
                "message": "robot_id is required",
            }));
            continue;
        };

        let robot = match RobotModel::find_by_id_for_user(&txn, robot_id, claims.sub).await {
            Ok(Some(robot)) => robot,
            Ok(None) => {
                results.push(json!({
                    "robot_id": robot_id,
                    "status": "error",
                    "message": "Robot not found or not owned by you",
                }));
                continue;
            }
            Err(e) => {
                let _ = txn.rollback().await;
                return server_error(e);
            }
        };

        let mut count: u64 = 0;
        for entry in group_sensors(group) {
            let Ok((temperature, humidity, speed)) = reading_values(entry) else {
                continue;
            };
            if let Err(e) =
                SensorDataModel::create(&txn, robot.id, temperature, humidity, speed).await
            {
                let _ = txn.rollback().await;
                return server_error(e);
            }
            count += 1;
        }

        total_sensors += count;
        results.push(json!({
            "robot_id": robot.id,
            "robot_name": robot.name,
            "status": "success",
            "count": count,
        }));
    }

    if let Err(e) = txn.commit().await {
        return server_error(e);
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({
                "total_sensors": total_sensors,
                "results": results,
            }),
            "Bulk upload complete",
        )),
    )
}

/// POST /api/robots/smart-upload
///
/// Upsert-by-name bulk upload. Each group names a robot: an existing robot
/// owned by the caller with that exact name is reused untouched, otherwise
/// one is created and its fresh id used for the group's readings within the
/// same transaction.
///
/// Unlike the id-keyed uploads, sensor coercion here is strict: the first
/// non-numeric value aborts and rolls back the entire request.
///
/// ### Request Body
/// ```json
/// { "robots": [ { "name": "R2", "model": "Astromech", "sensors": [ ... ] } ] }
/// ```
///
/// ### Responses
/// - `200 OK` with `{new_robots, total_sensors, results}`; each result
///   carries a `created` flag.
/// - `400 Bad Request` when the `robots` array is missing.
/// - `500 Internal Server Error` on malformed numerics or database failure
///   (everything rolled back).
pub async fn smart_upload(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let db = state.db();

    let Some(groups) = body.get("robots").and_then(Value::as_array) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "JSON format invalid. \"robots\" array is required.",
            )),
        );
    };

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => return server_error(e),
    };

    let mut results: Vec<Value> = Vec::with_capacity(groups.len());
    let mut total_sensors: u64 = 0;
    let mut new_robots: u64 = 0;

    for group in groups {
        let name = group.get("name").and_then(Value::as_str);
        let model = group.get("model").and_then(Value::as_str);
        let (Some(name), Some(model)) = (name, model) else {
            results.push(json!({
                "name": name.unwrap_or("Unknown"),
                "status": "error",
                "message": "Robot name and model are required",
            }));
            continue;
        };

        let (robot, created) =
            match RobotModel::find_by_name_for_user(&txn, name, claims.sub).await {
                Ok(Some(robot)) => (robot, false),
                Ok(None) => match RobotModel::create(&txn, claims.sub, name, model).await {
                    Ok(robot) => {
                        new_robots += 1;
                        (robot, true)
                    }
                    Err(e) => {
                        let _ = txn.rollback().await;
                        return server_error(e);
                    }
                },
                Err(e) => {
                    let _ = txn.rollback().await;
                    return server_error(e);
                }
            };

        let mut count: u64 = 0;
        for entry in group_sensors(group) {
            // Strict by design: no skip-and-continue here.
            let Ok((temperature, humidity, speed)) = reading_values(entry) else {
                let _ = txn.rollback().await;
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!(
                        "Invalid sensor value for robot '{}'",
                        robot.name
                    ))),
                );
            };
            if let Err(e) =
                SensorDataModel::create(&txn, robot.id, temperature, humidity, speed).await
            {
                let _ = txn.rollback().await;
                return server_error(e);
            }
            count += 1;
        }

        total_sensors += count;
        results.push(json!({
            "robot_id": robot.id,
            "name": robot.name,
            "model": robot.model,
            "status": "success",
            "created": created,
            "sensor_count": count,
        }));
    }

    if let Err(e) = txn.commit().await {
        return server_error(e);
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({
                "total_sensors": total_sensors,
                "new_robots": new_robots,
                "results": results,
            }),
            format!(
                "{} new robots created, {} sensor readings uploaded",
                new_robots, total_sensors
            ),
        )),
    )
}
