use crate::auth::claims::{AuthUser, Claims};
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderValue, Request, StatusCode, header::WWW_AUTHENTICATE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use common::Config;
use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Identity resolved from a verified token plus a fresh user-row lookup.
/// Role and name always reflect the current row, never the token's copy.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<user::Model> for CurrentUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// A 401 always carries `WWW-Authenticate: Bearer` so clients drop whatever
/// stale credential they sent instead of retrying it.
fn unauthenticated(message: &str) -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<Empty>::error(message)),
    )
        .into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Decodes the bearer token, re-resolves the user row by the token's subject
/// email, and inserts the resolved `CurrentUser` into the request extensions.
async fn extract_and_insert_current_user(
    db: &DatabaseConnection,
    req: Request<Body>,
) -> Result<(Request<Body>, CurrentUser, Claims), Response> {
    let (mut parts, body) = req.into_parts();
    let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(_, message)| unauthenticated(message))?;

    let user = user::Model::find_by_email(db, &claims.sub)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "DB error while resolving token subject");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(
                    "Database error while resolving user",
                )),
            )
                .into_response()
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("User not found")),
            )
                .into_response()
        })?;

    let mut req = Request::from_parts(parts, body);
    let current = CurrentUser::from(user);
    req.extensions_mut().insert(current.clone());
    Ok((req, current, claims))
}

/// Sliding-window refresh: when the presented token is close to expiry the
/// response carries a reissued one in `x-refreshed-token`. Subject and role
/// are preserved. A failed reissue leaves the still-valid token untouched.
fn attach_refreshed_token(mut response: Response, claims: &Claims) -> Response {
    // Only successful responses get a refreshed credential.
    if response.status().is_client_error() || response.status().is_server_error() {
        return response;
    }

    let threshold =
        Config::get_or_init_from_env().token_refresh_threshold_minutes as i64 * 60;
    let remaining = claims.exp as i64 - Utc::now().timestamp();
    if remaining <= 0 || remaining >= threshold {
        return response;
    }

    match crate::auth::reissue_token(claims) {
        Ok(token) => {
            if let Ok(value) = HeaderValue::from_str(&token) {
                response.headers_mut().insert("x-refreshed-token", value);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Token refresh failed; keeping existing token");
        }
    }
    response
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let (req, _user, claims) = extract_and_insert_current_user(app_state.db(), req).await?;

    Ok(attach_refreshed_token(next.run(req).await, &claims))
}

/// Support-agent-only guard. The role check runs against the freshly
/// resolved row, so a demoted agent's outstanding tokens stop working.
pub async fn allow_support_agent(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let (req, user, claims) = extract_and_insert_current_user(app_state.db(), req).await?;

    if user.role != Role::SupportAgent {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Empty>::error("Support agent access required")),
        )
            .into_response());
    }

    Ok(attach_refreshed_token(next.run(req).await, &claims))
}
