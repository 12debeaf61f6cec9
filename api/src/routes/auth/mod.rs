use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod get;
pub mod post;

use get::me;
use post::{login, register};

/// Builds the `/auth` route group.
///
/// `register` and `login` are public; `me` requires a valid token.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).route_layer(from_fn(allow_authenticated)))
}
