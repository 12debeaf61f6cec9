mod helpers;

use axum::http::StatusCode;
use db::models::robot::Model as RobotModel;
use db::models::sensor_data::Model as SensorDataModel;
use helpers::{authed_user, make_test_app, request, response_json};
use tower::ServiceExt;

#[tokio::test]
async fn readings_come_back_newest_first_and_capped_at_fifty() {
    let (app, db) = make_test_app().await;
    let (user, token) = authed_user(&db, "owner").await;
    let robot = RobotModel::create(&db, user.id, "R2", "Astromech")
        .await
        .unwrap();

    for i in 0..60 {
        SensorDataModel::create(&db, robot.id, 20.0 + i as f64, 50.0, 1.0)
            .await
            .unwrap();
    }

    let req = request("GET", &format!("/api/sensors/{}", robot.id), Some(&token), None);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let readings = body["data"].as_array().unwrap();
    assert_eq!(readings.len(), 50);
    for reading in readings {
        assert!(reading["temperature"].as_f64().is_some());
        assert!(reading["timestamp"].as_str().is_some());
    }
}

#[tokio::test]
async fn unknown_robot_yields_not_found() {
    let (app, db) = make_test_app().await;
    let (_user, token) = authed_user(&db, "owner").await;

    let req = request("GET", "/api/sensors/999", Some(&token), None);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Robot not found");
}

#[tokio::test]
async fn simulate_inserts_reading_and_drains_battery() {
    let (app, db) = make_test_app().await;
    let (user, token) = authed_user(&db, "owner").await;
    let robot = RobotModel::create(&db, user.id, "R2", "Astromech")
        .await
        .unwrap();

    let req = request(
        "POST",
        &format!("/api/simulate/{}", robot.id),
        Some(&token),
        None,
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let readings = SensorDataModel::all_for_robot(&db, robot.id).await.unwrap();
    assert_eq!(readings.len(), 1);
    assert!((20.0..=30.0).contains(&readings[0].temperature));
    assert!((40.0..=60.0).contains(&readings[0].humidity));
    assert!((0.0..=5.0).contains(&readings[0].speed));

    let robot = RobotModel::find_by_id_for_user(&db, robot.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!((95..=99).contains(&robot.battery));
}

#[tokio::test]
async fn simulate_floors_battery_at_zero() {
    let (app, db) = make_test_app().await;
    let (user, token) = authed_user(&db, "owner").await;
    let robot = RobotModel::create(&db, user.id, "R2", "Astromech")
        .await
        .unwrap();
    robot.drain_battery(&db, 98).await.unwrap();

    let req = request(
        "POST",
        &format!("/api/simulate/{}", robot.id),
        Some(&token),
        None,
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::OK
    );

    let robot = RobotModel::find_by_id_for_user(&db, robot.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!((0..=1).contains(&robot.battery));
}

#[tokio::test]
async fn simulate_rejects_foreign_robot() {
    let (app, db) = make_test_app().await;
    let (owner, _owner_token) = authed_user(&db, "owner").await;
    let (_intruder, intruder_token) = authed_user(&db, "intruder").await;
    let robot = RobotModel::create(&db, owner.id, "R2", "Astromech")
        .await
        .unwrap();

    let req = request(
        "POST",
        &format!("/api/simulate/{}", robot.id),
        Some(&intruder_token),
        None,
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        SensorDataModel::all_for_robot(&db, robot.id).await.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn stats_count_only_the_callers_fleet() {
    let (app, db) = make_test_app().await;
    let (user, token) = authed_user(&db, "owner").await;
    let (other, _other_token) = authed_user(&db, "other").await;

    let active = RobotModel::create(&db, user.id, "R2", "Astromech")
        .await
        .unwrap();
    let idle = RobotModel::create(&db, user.id, "C3PO", "Protocol")
        .await
        .unwrap();
    RobotModel::update_for_user(
        &db,
        idle.id,
        user.id,
        None,
        None,
        Some("offline".to_string()),
        None,
    )
    .await
    .unwrap();
    RobotModel::create(&db, other.id, "BB8", "Astromech")
        .await
        .unwrap();

    for _ in 0..4 {
        SensorDataModel::create(&db, active.id, 22.0, 50.0, 1.0)
            .await
            .unwrap();
    }

    let req = request("GET", "/api/stats", Some(&token), None);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["total_robots"], 2);
    assert_eq!(body["data"]["active_robots"], 1);
    assert_eq!(body["data"]["total_sensors"], 4);
}
