//! Response DTOs shared between route groups.

use db::models::ticket_historico::Model as TicketHistoricoModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketHistoricoResponse {
    pub id: Uuid,
    pub id_ticket: Uuid,
    pub status: String,
    pub texto: Option<String>,
    pub created_at: String,
}

impl From<TicketHistoricoModel> for TicketHistoricoResponse {
    fn from(entry: TicketHistoricoModel) -> Self {
        Self {
            id: entry.id,
            id_ticket: entry.id_ticket,
            status: entry.status.to_string(),
            texto: entry.texto,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}
