use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// Signed claim set carried by every access token.
///
/// `sub` is the user's email and serves as the identity lookup key; role and
/// name are informational only and re-resolved from the database on every
/// request before any authorization decision.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    pub name: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
