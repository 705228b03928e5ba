//! Request and response DTOs for the `/tickets` route group, plus the shared
//! mapping from lifecycle failures to HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use db::models::ticket::{LifecycleError, Model as TicketModel, TicketPrioridade};
use db::models::ticket_historico::Model as TicketHistoricoModel;
use sea_orm::DbConn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::TicketHistoricoResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct TicketCreateRequest {
    #[validate(length(
        min = 5,
        max = 150,
        message = "titulo must be between 5 and 150 characters"
    ))]
    pub titulo: String,

    #[validate(length(min = 10, message = "descricao must be at least 10 characters"))]
    pub descricao: String,

    pub id_usuario: Uuid,
    pub id_categoria: Uuid,
    pub prioridade: TicketPrioridade,
}

/// PUT /tickets/{id}/start
#[derive(Debug, Deserialize, Validate)]
pub struct TicketStartRequest {
    pub id_responsavel: Uuid,

    // Estimate is in days, one week at most.
    #[validate(range(min = 1, max = 7, message = "tempo_estimado must be between 1 and 7 days"))]
    pub tempo_estimado: i32,

    #[validate(length(
        min = 30,
        message = "observacoes_iniciais must be at least 30 characters"
    ))]
    pub observacoes_iniciais: String,
}

/// PUT /tickets/{id}/done
#[derive(Debug, Deserialize, Validate)]
pub struct TicketDoneRequest {
    #[validate(length(
        min = 100,
        message = "solucao_aplicada must be at least 100 characters"
    ))]
    pub solucao_aplicada: String,

    pub observacoes_internas: Option<String>,
}

/// PUT /tickets/{id}/close
#[derive(Debug, Deserialize, Validate)]
pub struct TicketCloseRequest {
    #[validate(range(min = 1, max = 5, message = "avaliacao must be between 1 and 5"))]
    pub avaliacao: i32,

    pub comentario_avaliacao: Option<String>,

    #[validate(length(
        min = 30,
        message = "comentario_confirmacao_usuario must be at least 30 characters"
    ))]
    pub comentario_confirmacao_usuario: String,
}

/// PUT /tickets/{id}/reopen
#[derive(Debug, Deserialize, Validate)]
pub struct TicketReopenRequest {
    #[validate(length(min = 1, message = "reabertura_motivo must not be empty"))]
    pub reabertura_motivo: String,

    #[validate(length(min = 1, message = "reabertura_detalhes must not be empty"))]
    pub reabertura_detalhes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: String,
    pub status: String,
    pub prioridade: String,
    pub tempo_estimado: Option<i32>,
    pub observacoes_iniciais: Option<String>,
    pub solucao_aplicada: Option<String>,
    pub observacoes_internas: Option<String>,
    pub reabertura_motivo: Option<String>,
    pub reabertura_detalhes: Option<String>,
    pub avaliacao: Option<i32>,
    pub comentario_avaliacao: Option<String>,
    pub comentario_confirmacao_usuario: Option<String>,
    pub id_usuario: Uuid,
    pub id_categoria: Uuid,
    pub id_responsavel: Option<Uuid>,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub historicos: Vec<TicketHistoricoResponse>,
}

impl TicketResponse {
    pub fn from_parts(ticket: TicketModel, historicos: Vec<TicketHistoricoModel>) -> Self {
        Self {
            id: ticket.id,
            titulo: ticket.titulo,
            descricao: ticket.descricao,
            status: ticket.status.to_string(),
            prioridade: ticket.prioridade.to_string(),
            tempo_estimado: ticket.tempo_estimado,
            observacoes_iniciais: ticket.observacoes_iniciais,
            solucao_aplicada: ticket.solucao_aplicada,
            observacoes_internas: ticket.observacoes_internas,
            reabertura_motivo: ticket.reabertura_motivo,
            reabertura_detalhes: ticket.reabertura_detalhes,
            avaliacao: ticket.avaliacao,
            comentario_avaliacao: ticket.comentario_avaliacao,
            comentario_confirmacao_usuario: ticket.comentario_confirmacao_usuario,
            id_usuario: ticket.id_usuario,
            id_categoria: ticket.id_categoria,
            id_responsavel: ticket.id_responsavel,
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.map(|t| t.to_rfc3339()),
            historicos: historicos.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TicketModel> for TicketResponse {
    fn from(ticket: TicketModel) -> Self {
        Self::from_parts(ticket, Vec::new())
    }
}

/// Maps a lifecycle failure onto the HTTP surface: 404 for a missing ticket,
/// 400 for a state mismatch (message names both statuses), 500 otherwise.
pub fn lifecycle_error_response(err: LifecycleError) -> Response {
    match err {
        LifecycleError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Ticket not found")),
        )
            .into_response(),
        e @ LifecycleError::InvalidTransition { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
        LifecycleError::Db(e) => {
            tracing::error!("ticket operation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Builds the standard ticket response, history included newest-first.
pub async fn ticket_with_history(
    db: &DbConn,
    status_code: StatusCode,
    ticket: TicketModel,
    message: &str,
) -> Response {
    match TicketHistoricoModel::list_by_ticket(db, ticket.id).await {
        Ok(historicos) => (
            status_code,
            Json(ApiResponse::success(
                TicketResponse::from_parts(ticket, historicos),
                message,
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}
