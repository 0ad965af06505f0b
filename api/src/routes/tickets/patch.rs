use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::ticket::{Model as TicketModel, TicketStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Serialize, Default)]
pub struct TicketStatusResponse {
    pub id: i64,
    pub status: String,
}

/// PATCH /tickets/{ticket_id}/status
///
/// Moves a ticket to a new status. The route's guard already limits callers
/// to support agents.
///
/// ### Responses
/// - `200 OK` → status updated
/// - `400 Bad Request` → unknown status value
/// - `403 Forbidden` → caller is not a support agent (from the guard)
/// - `404 Not Found` → no such ticket
pub async fn update_ticket_status(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let status = match TicketStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<TicketStatusResponse>::error(
                    "Status must be 'open', 'in_progress' or 'closed'",
                )),
            )
                .into_response();
        }
    };

    let db = app_state.db();

    match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<TicketStatusResponse>::error(
                    "Ticket not found",
                )),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketStatusResponse>::error(
                    "Database error while checking ticket",
                )),
            )
                .into_response();
        }
    }

    match TicketModel::set_status(db, ticket_id, status).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketStatusResponse {
                    id: ticket.id,
                    status: ticket.status.to_string(),
                },
                "Ticket status updated successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<TicketStatusResponse>::error(
                "Failed to update ticket status",
            )),
        )
            .into_response(),
    }
}
