use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::format_validation_errors;
use db::models::ticket::Model as TicketModel;
use db::models::ticket_response::Model as ResponseModel;
use serde::Deserialize;
use validator::Validate;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::{ResponseEntry, can_access_ticket};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddResponseRequest {
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

/// POST /tickets/{ticket_id}/responses
///
/// Appends a response to a ticket. Allowed for the ticket's owner and any
/// support agent.
///
/// ### Responses
/// - `201 Created` → the appended response
/// - `400 Bad Request` → empty message
/// - `403 Forbidden` → caller is neither the owner nor a support agent
/// - `404 Not Found` → no such ticket
pub async fn add_ticket_response(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AddResponseRequest>,
) -> Response {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ResponseEntry>::error(error_message)),
        )
            .into_response();
    }

    let db = app_state.db();

    let ticket = match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResponseEntry>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResponseEntry>::error(
                    "Database error while checking ticket",
                )),
            )
                .into_response();
        }
    };

    if !can_access_ticket(&user, &ticket) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<ResponseEntry>::error(
                "Not authorized to add a response to this ticket",
            )),
        )
            .into_response();
    }

    match ResponseModel::create(db, ticket.id, user.id, &req.message).await {
        Ok(response) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ResponseEntry::from(response),
                "Response added successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ResponseEntry>::error(
                "Failed to add response",
            )),
        )
            .into_response(),
    }
}
