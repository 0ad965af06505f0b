//! HTTP route entry point for `/api/...`.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login, logout and identity endpoints
//! - `/dashboard`, `/customer_dashboard`, `/support_agent_dashboard` →
//!   role-resolved dashboards (authenticated)
//! - `/tickets` → Ticket workflow endpoints (authenticated; status updates
//!   are support-agent only)

use crate::routes::{
    auth::auth_routes, dashboard::dashboard_routes, health::health_routes,
    tickets::ticket_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod tickets;

/// Builds the complete application router for all HTTP endpoints.
///
/// Guards are applied per route group inside each builder, so every
/// protected route re-runs the auth gate on every request; nothing is
/// carried over from a previous resolution or across a redirect.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes(app_state.clone()))
        .merge(dashboard_routes(app_state.clone()))
        .nest("/tickets", ticket_routes(app_state.clone()))
        .with_state(app_state)
}
