use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use db::models::ticket::{
    Column as TicketColumn, Entity as TicketEntity, Model as TicketModel, Priority, TicketStatus,
};
use db::models::user::{Entity as UserEntity, Role};
use migration::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::auth::common::IdentityResponse;
use crate::routes::tickets::common::{TicketDetail, with_responses};
use crate::state::AppState;

/// Destination for a resolved role. Pure function of the role; the handlers
/// below still re-run the auth gate themselves.
fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Customer => "/api/customer_dashboard",
        Role::SupportAgent => "/api/support_agent_dashboard",
    }
}

/// GET /dashboard
///
/// Redirects the caller to the dashboard matching their role.
pub async fn resolve_dashboard(Extension(user): Extension<CurrentUser>) -> Response {
    Redirect::to(dashboard_path(user.role)).into_response()
}

#[derive(Debug, Serialize, Default)]
pub struct DashboardResponse {
    pub user: IdentityResponse,
    pub tickets: Vec<TicketDetail>,
}

/// GET /customer_dashboard
///
/// The caller's own tickets, newest first, responses embedded. A support
/// agent landing here is redirected to their own dashboard.
pub async fn customer_dashboard(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    if user.role != Role::Customer {
        return Redirect::to(dashboard_path(user.role)).into_response();
    }

    let db = app_state.db();

    let tickets = match TicketModel::find_for_user(db, user.id).await {
        Ok(tickets) => tickets,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load customer dashboard");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardResponse>::error(
                    "Failed to load dashboard",
                )),
            )
                .into_response();
        }
    };

    match with_responses(db, tickets).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                DashboardResponse {
                    user: IdentityResponse::from(&user),
                    tickets: details,
                },
                "Dashboard loaded",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<DashboardResponse>::error(
                "Failed to load dashboard",
            )),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct AgentFilterReq {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Case-insensitive substring match on the ticket owner's name.
    pub customer: Option<String>,
}

/// GET /support_agent_dashboard
///
/// All tickets, newest first, optionally filtered by status, priority and
/// customer name. A customer landing here is redirected to their own
/// dashboard.
pub async fn support_agent_dashboard(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AgentFilterReq>,
) -> Response {
    if user.role != Role::SupportAgent {
        return Redirect::to(dashboard_path(user.role)).into_response();
    }

    let db = app_state.db();

    let mut condition = Condition::all();

    if let Some(ref status) = params.status {
        match TicketStatus::from_str(status) {
            Ok(status) => condition = condition.add(TicketColumn::Status.eq(status)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<DashboardResponse>::error(
                        "Invalid status value",
                    )),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref priority) = params.priority {
        match Priority::from_str(priority) {
            Ok(priority) => condition = condition.add(TicketColumn::Priority.eq(priority)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<DashboardResponse>::error(
                        "Invalid priority value",
                    )),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref customer) = params.customer {
        let pattern = format!("%{}%", customer.to_lowercase());
        let owners = match UserEntity::find()
            .filter(Expr::cust("LOWER(name)").like(&pattern))
            .all(db)
            .await
        {
            Ok(owners) => owners,
            Err(e) => {
                tracing::error!(error = %e, "Failed to filter by customer name");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<DashboardResponse>::error(
                        "Failed to load dashboard",
                    )),
                )
                    .into_response();
            }
        };
        let owner_ids: Vec<i64> = owners.iter().map(|u| u.id).collect();

        if owner_ids.is_empty() {
            return (
                StatusCode::OK,
                Json(ApiResponse::success(
                    DashboardResponse {
                        user: IdentityResponse::from(&user),
                        tickets: vec![],
                    },
                    "Dashboard loaded",
                )),
            )
                .into_response();
        }

        condition = condition.add(TicketColumn::UserId.is_in(owner_ids));
    }

    let tickets = match TicketEntity::find()
        .filter(condition)
        .order_by_desc(TicketColumn::CreatedAt)
        .all(db)
        .await
    {
        Ok(tickets) => tickets,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load agent dashboard");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardResponse>::error(
                    "Failed to load dashboard",
                )),
            )
                .into_response();
        }
    };

    match with_responses(db, tickets).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                DashboardResponse {
                    user: IdentityResponse::from(&user),
                    tickets: details,
                },
                "Dashboard loaded",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<DashboardResponse>::error(
                "Failed to load dashboard",
            )),
        )
            .into_response(),
    }
}
