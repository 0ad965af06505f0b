//! Ticket workflow routes.
//!
//! Routes:
//! - `POST  /tickets/create_ticket`            → Create a ticket (customers)
//! - `GET   /tickets/get_tickets`              → Role-scoped listing
//! - `GET   /tickets/{ticket_id}`              → Single ticket with responses
//! - `POST  /tickets/{ticket_id}/responses`    → Append a response
//! - `GET   /tickets/{ticket_id}/responses`    → List a ticket's responses
//! - `PATCH /tickets/{ticket_id}/status`       → Update status (agents only)
//!
//! Every route re-runs the auth gate via its guard layer; ownership checks
//! happen in the handlers against the freshly resolved identity.

use crate::auth::guards::{allow_authenticated, allow_support_agent};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};

pub mod common;
pub mod get;
pub mod patch;
pub mod post;
pub mod responses;

use get::{get_ticket, get_tickets};
use patch::update_ticket_status;
use post::create_ticket;
use responses::response_routes;

pub fn ticket_routes(app_state: AppState) -> Router<AppState> {
    let agent_only = Router::new()
        .route("/{ticket_id}/status", patch(update_ticket_status))
        .route_layer(from_fn_with_state(app_state.clone(), allow_support_agent));

    Router::new()
        .route("/create_ticket", post(create_ticket))
        .route("/get_tickets", get(get_tickets))
        .route("/{ticket_id}", get(get_ticket))
        .nest("/{ticket_id}/responses", response_routes())
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
        .merge(agent_only)
}
