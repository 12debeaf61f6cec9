use api::auth::generate_jwt;
use api::routes::routes;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::Request,
    response::Response,
};
use db::models::user::Model as UserModel;
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use util::{config::AppConfig, state::AppState};

/// Builds a fresh app against its own in-memory database.
///
/// The connection is returned alongside the router so tests can seed and
/// inspect rows directly.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60);

    let db = setup_test_db().await;
    let app_state = AppState::new(db.clone());
    let router = Router::new().nest("/api", routes(app_state));

    (router, db)
}

/// Creates a user and a valid bearer token for them.
pub async fn authed_user(db: &DatabaseConnection, username: &str) -> (UserModel, String) {
    let user = UserModel::create(
        db,
        username,
        &format!("{}@example.com", username),
        "password123",
    )
    .await
    .expect("Failed to create test user");
    let (token, _) = generate_jwt(user.id, false);
    (user, token)
}

/// Builds a JSON request with an optional bearer token.
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
