use crate::auth::guards::CurrentUser;
use db::models::user::Model as UserModel;
use serde::Serialize;

/// Account payload returned by register and login: the identity summary plus
/// a freshly issued access token.
#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

impl UserResponse {
    pub fn new(user: UserModel, token: String, expires_at: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            token,
            expires_at,
        }
    }
}

/// Identity summary without credential material; used by `/auth/me` and the
/// dashboards.
#[derive(Debug, Serialize, Default)]
pub struct IdentityResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&CurrentUser> for IdentityResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
        }
    }
}
