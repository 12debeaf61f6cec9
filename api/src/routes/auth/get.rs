use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::{Entity as UserEntity, Model as UserModel};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

/// GET /auth/me
///
/// Returns the profile of the authenticated user.
///
/// ### Responses
/// - `200 OK` with the user record (password hash omitted).
/// - `401 Unauthorized` when the token subject no longer exists.
pub async fn me(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match UserEntity::find_by_id(claims.sub).one(state.db()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(user), "User retrieved")),
        ),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<Option<UserModel>>::error("Unknown user")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<UserModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
