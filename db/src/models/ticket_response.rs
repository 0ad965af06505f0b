use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, entity::prelude::*, ActiveValue::Set, QueryFilter};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "ticket_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub ticket_id: i64,
    pub responder_id: i64,

    pub message: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ResponderId",
        to = "super::user::Column::Id"
    )]
    Responder,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Responses are append-only; there is no update or delete surface.
    pub async fn create(
        db: &DbConn,
        ticket_id: i64,
        responder_id: i64,
        message: &str,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            responder_id: Set(responder_id),
            message: Set(message.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn find_all_for_ticket(db: &DbConn, ticket_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Responses for a batch of tickets in one query, oldest first. Used when
    /// embedding responses into ticket listings.
    pub async fn find_for_tickets(db: &DbConn, ticket_ids: &[i64]) -> Result<Vec<Model>, DbErr> {
        if ticket_ids.is_empty() {
            return Ok(vec![]);
        }

        Entity::find()
            .filter(Column::TicketId.is_in(ticket_ids.to_vec()))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }
}
