pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};
pub use guards::CurrentUser;

use chrono::{Duration, Utc};
use common::Config;
use db::models::user;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

/// Generates a signed access token and its expiry timestamp for a user row.
///
/// The claim set is `{sub: email, uid, name, role, iat, exp, jti}`; `exp` is
/// `now + JWT_DURATION_MINUTES` and `jti` is a fresh UUID so every issued
/// token is distinguishable.
pub fn generate_token(user: &user::Model) -> (String, String) {
    let config = Config::get_or_init_from_env();
    let now = Utc::now();
    let expiry = now + Duration::minutes(config.jwt_duration_minutes as i64);

    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id,
        name: user.name.clone(),
        role: user.role,
        iat: now.timestamp() as usize,
        exp: expiry.timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}

/// Reissues a token with the same identity claims and a fresh lifetime.
/// Subject and role are carried over verbatim; only `iat`, `exp` and `jti`
/// change.
pub(crate) fn reissue_token(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    let config = Config::get_or_init_from_env();
    let now = Utc::now();
    let expiry = now + Duration::minutes(config.jwt_duration_minutes as i64);

    let refreshed = Claims {
        sub: claims.sub.clone(),
        uid: claims.uid,
        name: claims.name.clone(),
        role: claims.role,
        iat: now.timestamp() as usize,
        exp: expiry.timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &refreshed,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}
