//! Ticket response routes, nested under `/tickets/{ticket_id}/responses`.
//! Responses are append-only; there is no edit or delete surface.

use crate::state::AppState;
use axum::{Router, routing::get};

pub mod get;
pub mod post;

use get::get_ticket_responses;
use post::add_ticket_response;

pub fn response_routes() -> Router<AppState> {
    Router::new().route("/", get(get_ticket_responses).post(add_ticket_response))
}
