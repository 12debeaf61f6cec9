mod helpers;

use axum::http::StatusCode;
use db::models::sensor_data::Model as SensorDataModel;
use helpers::{authed_user, make_test_app, request, response_json};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn create_and_list_robots() {
    let (app, db) = make_test_app().await;
    let (_user, token) = authed_user(&db, "owner").await;

    let req = request(
        "POST",
        "/api/robots",
        Some(&token),
        Some(json!({ "name": "R2", "model": "Astromech" })),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Robot added");
    assert!(body["data"]["id"].as_i64().is_some());

    let req = request("GET", "/api/robots", Some(&token), None);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let robots = body["data"].as_array().unwrap();
    assert_eq!(robots.len(), 1);
    assert_eq!(robots[0]["name"], "R2");
    assert_eq!(robots[0]["status"], "active");
    assert_eq!(robots[0]["battery"], 100);
    assert_eq!(robots[0]["sensor_count"], 0);
}

#[tokio::test]
async fn create_robot_requires_name_and_model() {
    let (app, db) = make_test_app().await;
    let (_user, token) = authed_user(&db, "owner").await;

    let req = request(
        "POST",
        "/api/robots",
        Some(&token),
        Some(json!({ "name": "R2" })),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn update_is_partial() {
    let (app, db) = make_test_app().await;
    let (_user, token) = authed_user(&db, "owner").await;

    let req = request(
        "POST",
        "/api/robots",
        Some(&token),
        Some(json!({ "name": "R2", "model": "Astromech" })),
    );
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = request(
        "PUT",
        &format!("/api/robots/{}", id),
        Some(&token),
        Some(json!({ "status": "maintenance" })),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::OK
    );

    let req = request("GET", "/api/robots", Some(&token), None);
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    let robot = &body["data"].as_array().unwrap()[0];
    assert_eq!(robot["status"], "maintenance");
    // Untouched fields survive the partial update.
    assert_eq!(robot["name"], "R2");
    assert_eq!(robot["model"], "Astromech");
    assert_eq!(robot["battery"], 100);
}

#[tokio::test]
async fn robots_are_invisible_across_users() {
    let (app, db) = make_test_app().await;
    let (_owner, owner_token) = authed_user(&db, "owner").await;
    let (_intruder, intruder_token) = authed_user(&db, "intruder").await;

    let req = request(
        "POST",
        "/api/robots",
        Some(&owner_token),
        Some(json!({ "name": "R2", "model": "Astromech" })),
    );
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = request("GET", "/api/robots", Some(&intruder_token), None);
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let req = request(
        "PUT",
        &format!("/api/robots/{}", id),
        Some(&intruder_token),
        Some(json!({ "status": "hijacked" })),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );

    let req = request(
        "DELETE",
        &format!("/api/robots/{}", id),
        Some(&intruder_token),
        None,
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );

    let req = request(
        "GET",
        &format!("/api/sensors/{}", id),
        Some(&intruder_token),
        None,
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );

    // The owner still sees their robot.
    let req = request("GET", "/api/robots", Some(&owner_token), None);
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_cascades_to_sensor_rows() {
    let (app, db) = make_test_app().await;
    let (_user, token) = authed_user(&db, "owner").await;

    let req = request(
        "POST",
        "/api/robots",
        Some(&token),
        Some(json!({ "name": "R2", "model": "Astromech" })),
    );
    let body = response_json(app.clone().oneshot(req).await.unwrap()).await;
    let id = body["data"]["id"].as_i64().unwrap();

    for _ in 0..3 {
        SensorDataModel::create(&db, id, 21.0, 50.0, 1.0).await.unwrap();
    }

    let req = request("DELETE", &format!("/api/robots/{}", id), Some(&token), None);
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::OK
    );

    assert_eq!(
        SensorDataModel::all_for_robot(&db, id).await.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn robot_routes_require_authentication() {
    let (app, _db) = make_test_app().await;

    let req = request("GET", "/api/robots", None, None);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Authentication required");
}
