use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::ticket::Model as TicketModel;
use db::models::ticket_response::Model as ResponseModel;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::{ResponseEntry, can_access_ticket};
use crate::state::AppState;

/// GET /tickets/{ticket_id}/responses
///
/// Lists a ticket's responses in chronological order. Unauthorized callers
/// receive a 403 and no data at all, never a partial list.
pub async fn get_ticket_responses(
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
                Json(ApiResponse::<Vec<ResponseEntry>>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ResponseEntry>>::error(
                    "Database error while checking ticket",
                )),
            )
                .into_response();
        }
    };

    if !can_access_ticket(&user, &ticket) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Vec<ResponseEntry>>::error(
                "Not authorized to view this ticket's responses",
            )),
        )
            .into_response();
    }

    match ResponseModel::find_all_for_ticket(db, ticket.id).await {
        Ok(responses) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                responses
                    .into_iter()
                    .map(ResponseEntry::from)
                    .collect::<Vec<_>>(),
                "Responses retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<ResponseEntry>>::error(
                "Failed to retrieve responses",
            )),
        )
            .into_response(),
    }
}
