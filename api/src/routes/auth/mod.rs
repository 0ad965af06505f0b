//! Authentication routes.
//!
//! Routes:
//! - `POST /auth/register` → Create an account (public)
//! - `POST /auth/login`    → Authenticate and receive an access token (public)
//! - `GET  /auth/logout`   → End the session; clients discard the token (public)
//! - `GET  /auth/me`       → Resolved identity of the caller (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

pub mod common;
pub mod get;
pub mod post;

use get::{logout, me};
use post::{login, register};

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .merge(protected)
}
