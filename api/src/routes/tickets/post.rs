use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use common::format_validation_errors;
use db::models::ticket::{Model as TicketModel, Priority};
use db::models::user::Role;
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::TicketDetail;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Subject must be between 1 and 255 characters"
    ))]
    pub subject: String,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    pub priority: String,
}

/// POST /tickets/create_ticket
///
/// Creates a ticket for the calling customer with `status = open`.
///
/// A non-customer caller is redirected to their own dashboard rather than
/// shown an error page.
///
/// ### Responses
/// - `201 Created` → the new ticket
/// - `303 See Other` → caller is not a customer
/// - `400 Bad Request` → validation failure or unknown priority
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTicketRequest>,
) -> Response {
    if user.role != Role::Customer {
        return Redirect::to("/api/support_agent_dashboard").into_response();
    }

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketDetail>::error(error_message)),
        )
            .into_response();
    }

    let priority = match Priority::from_str(&req.priority) {
        Ok(priority) => priority,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<TicketDetail>::error(
                    "Priority must be 'low', 'medium' or 'high'",
                )),
            )
                .into_response();
        }
    };

    let db = app_state.db();

    match TicketModel::create(db, user.id, &req.subject, &req.description, priority).await {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketDetail::from_parts(ticket, vec![]),
                "Ticket created successfully",
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<TicketDetail>::error(e.to_string())),
        )
            .into_response(),
    }
}
