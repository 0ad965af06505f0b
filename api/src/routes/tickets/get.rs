use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::ticket::Model as TicketModel;
use db::models::ticket_response::Model as ResponseModel;
use db::models::user::Role;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::{TicketDetail, can_access_ticket, with_responses};
use crate::state::AppState;

/// GET /tickets/get_tickets
///
/// Role-scoped listing, newest first, responses embedded: support agents see
/// every ticket, customers only their own.
pub async fn get_tickets(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    let db = app_state.db();

    let tickets = match user.role {
        Role::SupportAgent => TicketModel::find_all(db).await,
        Role::Customer => TicketModel::find_for_user(db, user.id).await,
    };

    let tickets = match tickets {
        Ok(tickets) => tickets,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list tickets");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<TicketDetail>>::error(
                    "Failed to retrieve tickets",
                )),
            )
                .into_response();
        }
    };

    match with_responses(db, tickets).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                details,
                "Tickets retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to embed ticket responses");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<TicketDetail>>::error(
                    "Failed to retrieve tickets",
                )),
            )
                .into_response()
        }
    }
}

/// GET /tickets/{ticket_id}
///
/// Single ticket with its responses. Visible to the owning customer and any
/// support agent; other callers receive a 403 with no ticket data.
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    let db = app_state.db();

    let ticket = match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<TicketDetail>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketDetail>::error(
                    "Failed to retrieve ticket",
                )),
            )
                .into_response();
        }
    };

    if !can_access_ticket(&user, &ticket) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<TicketDetail>::error(
                "Not authorized to view this ticket",
            )),
        )
            .into_response();
    }

    match ResponseModel::find_all_for_ticket(db, ticket.id).await {
        Ok(responses) => {
            let detail =
                TicketDetail::from_parts(ticket, responses.into_iter().map(Into::into).collect());
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    detail,
                    "Ticket retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<TicketDetail>::error(
                "Failed to retrieve ticket",
            )),
        )
            .into_response(),
    }
}
