use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/register
///
/// Register a new user.
///
/// ### Request Body
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user's id and a fresh token.
/// - `400 Bad Request` on validation failure.
/// - `409 Conflict` when the username or email is already registered.
/// - `500 Internal Server Error` on database failure.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let db = state.db();

    match UserModel::get_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::get_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::create(db, &req.username, &req.email, &req.password).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, false);
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    UserResponse {
                        id: user.id,
                        username: user.username,
                        email: user.email,
                        token,
                        expires_at,
                    },
                    "User registered successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Extends the token lifetime, standing in for a persistent session.
    #[serde(default)]
    pub remember: bool,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// ### Responses
/// - `200 OK` with a token and expiry.
/// - `401 Unauthorized` on unknown username or wrong password.
/// - `500 Internal Server Error` on database failure.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = state.db();

    let user = match UserModel::get_by_username(db, &req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<UserResponse>::error(
                    "Invalid username or password",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<UserResponse>::error(
                "Invalid username or password",
            )),
        );
    }

    let (token, expires_at) = generate_jwt(user.id, req.remember);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                token,
                expires_at,
            },
            "Login successful",
        )),
    )
}
