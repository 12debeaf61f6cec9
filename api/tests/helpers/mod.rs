pub mod app;

pub use app::{authed_user, make_test_app, request, response_json};
