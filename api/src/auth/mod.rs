pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config;

/// Token lifetime for "remember me" logins.
const REMEMBER_ME_MINUTES: i64 = 60 * 24;

/// Generates a JWT and its expiry timestamp for a given user.
///
/// `remember` extends the token lifetime beyond the configured default,
/// standing in for a persistent session.
pub fn generate_jwt(user_id: i64, remember: bool) -> (String, String) {
    let minutes = if remember {
        config::jwt_duration_minutes().max(REMEMBER_ME_MINUTES)
    } else {
        config::jwt_duration_minutes()
    };

    let expiry = Utc::now() + Duration::minutes(minutes);
    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}
