use crate::auth::guards::CurrentUser;
use db::models::ticket::Model as TicketModel;
use db::models::ticket_response::Model as ResponseModel;
use db::models::user::Role;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use std::collections::HashMap;

/// A single response on a ticket.
#[derive(Debug, Serialize, Default)]
pub struct ResponseEntry {
    pub id: i64,
    pub responder_id: i64,
    pub message: String,
    pub timestamp: String,
}

impl From<ResponseModel> for ResponseEntry {
    fn from(response: ResponseModel) -> Self {
        Self {
            id: response.id,
            responder_id: response.responder_id,
            message: response.message,
            timestamp: response.created_at.to_rfc3339(),
        }
    }
}

/// A ticket with its responses embedded, oldest response first.
#[derive(Debug, Serialize, Default)]
pub struct TicketDetail {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub responses: Vec<ResponseEntry>,
}

impl TicketDetail {
    pub fn from_parts(ticket: TicketModel, responses: Vec<ResponseEntry>) -> Self {
        Self {
            id: ticket.id,
            user_id: ticket.user_id,
            subject: ticket.subject,
            description: ticket.description,
            priority: ticket.priority.to_string(),
            status: ticket.status.to_string(),
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
            responses,
        }
    }
}

/// Ticket visibility rule: the owning customer or any support agent.
pub fn can_access_ticket(user: &CurrentUser, ticket: &TicketModel) -> bool {
    user.role == Role::SupportAgent || ticket.user_id == user.id
}

/// Embeds responses into a batch of tickets with a single query.
pub async fn with_responses(
    db: &DatabaseConnection,
    tickets: Vec<TicketModel>,
) -> Result<Vec<TicketDetail>, DbErr> {
    let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();

    let mut by_ticket: HashMap<i64, Vec<ResponseEntry>> = HashMap::new();
    for response in ResponseModel::find_for_tickets(db, &ids).await? {
        by_ticket
            .entry(response.ticket_id)
            .or_default()
            .push(response.into());
    }

    Ok(tickets
        .into_iter()
        .map(|ticket| {
            let responses = by_ticket.remove(&ticket.id).unwrap_or_default();
            TicketDetail::from_parts(ticket, responses)
        })
        .collect())
}
