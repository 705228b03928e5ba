//! Ticket lifecycle transition handlers.
//!
//! Each handler validates the payload, then delegates to the lifecycle
//! engine in `db`, which enforces the state machine and commits the ticket
//! mutation together with its history entry.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::ticket::Model as TicketModel;
use util::state::AppState;
use uuid::Uuid;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::tickets::common::{
    TicketCloseRequest, TicketDoneRequest, TicketReopenRequest, TicketStartRequest,
    lifecycle_error_response, ticket_with_history,
};

fn validation_failure(errors: &validator::ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(format_validation_errors(errors))),
    )
        .into_response()
}

/// PUT /api/tickets/{ticket_id}/start
///
/// `aberto → em_andamento`: assigns a collaborator, an estimate in days
/// (1–7), and initial notes. Fails 400 if the ticket is in any other state.
pub async fn start_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<TicketStartRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return validation_failure(&validation_errors);
    }

    match TicketModel::start(
        db,
        ticket_id,
        req.id_responsavel,
        req.tempo_estimado,
        &req.observacoes_iniciais,
    )
    .await
    {
        Ok(ticket) => {
            ticket_with_history(db, StatusCode::OK, ticket, "Ticket started successfully").await
        }
        Err(e) => lifecycle_error_response(e),
    }
}

/// PUT /api/tickets/{ticket_id}/done
///
/// `em_andamento → resolvido`: records the applied solution and optional
/// internal notes.
pub async fn resolve_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<TicketDoneRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return validation_failure(&validation_errors);
    }

    match TicketModel::resolve(
        db,
        ticket_id,
        &req.solucao_aplicada,
        req.observacoes_internas.as_deref(),
    )
    .await
    {
        Ok(ticket) => {
            ticket_with_history(db, StatusCode::OK, ticket, "Ticket resolved successfully").await
        }
        Err(e) => lifecycle_error_response(e),
    }
}

/// PUT /api/tickets/{ticket_id}/close
///
/// `resolvido → concluido`: the requesting user confirms the fix and rates
/// it (1–5). Only allowed from `resolvido`; `em_andamento` is rejected.
pub async fn close_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<TicketCloseRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return validation_failure(&validation_errors);
    }

    match TicketModel::close(
        db,
        ticket_id,
        req.avaliacao,
        req.comentario_avaliacao.as_deref(),
        &req.comentario_confirmacao_usuario,
    )
    .await
    {
        Ok(ticket) => {
            ticket_with_history(db, StatusCode::OK, ticket, "Ticket closed successfully").await
        }
        Err(e) => lifecycle_error_response(e),
    }
}

/// PUT /api/tickets/{ticket_id}/reopen
///
/// `resolvido → em_andamento`: the user rejects the solution. May be
/// repeated any number of times; resolution fields are kept.
pub async fn reopen_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<TicketReopenRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return validation_failure(&validation_errors);
    }

    match TicketModel::reopen(
        db,
        ticket_id,
        &req.reabertura_motivo,
        &req.reabertura_detalhes,
    )
    .await
    {
        Ok(ticket) => {
            ticket_with_history(db, StatusCode::OK, ticket, "Ticket reopened successfully").await
        }
        Err(e) => lifecycle_error_response(e),
    }
}
