//! Role-resolved dashboard routes.
//!
//! Routes:
//! - `GET /dashboard`               → 303 to the caller's role dashboard
//! - `GET /customer_dashboard`      → identity + own tickets, newest first
//! - `GET /support_agent_dashboard` → identity + all tickets, filterable
//!
//! The guard layer re-runs the auth gate on each of these independently; a
//! redirect from `/dashboard` never carries a prior resolution with it.

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::get};

pub mod get;

use get::{customer_dashboard, resolve_dashboard, support_agent_dashboard};

pub fn dashboard_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(resolve_dashboard))
        .route("/customer_dashboard", get(customer_dashboard))
        .route("/support_agent_dashboard", get(support_agent_dashboard))
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
