use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryFilter;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ticket::TicketStatus;

/// One immutable audit record of a ticket status change.
///
/// Rows are only ever inserted (by the lifecycle engine, inside the same
/// transaction as the ticket write) and only ever removed by the ticket's
/// cascade delete.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_historicos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub id_ticket: Uuid,
    pub status: TicketStatus,
    pub texto: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::IdTicket",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends one history entry recording `status` for `id_ticket`.
    ///
    /// Generic over the connection so the lifecycle engine can call it on an
    /// open transaction and have the append commit or roll back together
    /// with the ticket mutation.
    pub async fn append<C: ConnectionTrait>(
        conn: &C,
        id_ticket: Uuid,
        status: TicketStatus,
        texto: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            id_ticket: Set(id_ticket),
            status: Set(status),
            texto: Set(texto.map(|t| t.to_owned())),
            created_at: Set(Utc::now()),
        };

        active_model.insert(conn).await
    }

    /// All history entries for a ticket, newest first.
    pub async fn list_by_ticket(db: &DbConn, id_ticket: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::IdTicket.eq(id_ticket))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}
