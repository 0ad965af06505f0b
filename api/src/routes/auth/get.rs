use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::auth::common::IdentityResponse;

/// GET /auth/me
///
/// Returns the caller's resolved identity. The guard has already re-run the
/// full auth gate, so the role here reflects the current user row.
pub async fn me(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            IdentityResponse::from(&user),
            "Identity resolved",
        )),
    )
}

/// GET /auth/logout
///
/// Tokens are stateless and there is no server-side revocation list, so
/// logging out means the client discards its token. The endpoint exists so
/// clients have a single place to end a session.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            (),
            "Logged out; discard the access token",
        )),
    )
}
