//! Ticket history routes.
//!
//! Lifecycle appends happen inside the engine's transactions; this group
//! only exposes the newest-first listing and a manual free-text interaction
//! entry that does not touch the ticket's status.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use db::models::ticket::{Model as TicketModel, TicketStatus};
use db::models::ticket_historico::Model as TicketHistoricoModel;
use serde::Deserialize;
use util::state::AppState;
use uuid::Uuid;

use crate::response::ApiResponse;
use crate::routes::common::TicketHistoricoResponse;

#[derive(Debug, Deserialize)]
pub struct TicketHistoricoCreateRequest {
    pub id_ticket: Uuid,
    pub texto: String,
    pub status: TicketStatus,
}

/// GET /api/historicos/ticket/{id_ticket}
///
/// All history entries for one ticket, newest first.
async fn list_ticket_history(
    State(app_state): State<AppState>,
    Path(id_ticket): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match TicketHistoricoModel::list_by_ticket(db, id_ticket).await {
        Ok(historicos) => {
            let response: Vec<TicketHistoricoResponse> =
                historicos.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Historicos retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/historicos
///
/// Appends a manual interaction entry to a ticket's history. The ticket's
/// own status is not modified; the recorded status is an annotation.
async fn create_interaction(
    State(app_state): State<AppState>,
    Json(req): Json<TicketHistoricoCreateRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match TicketModel::find_by_id(db, req.id_ticket).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response();
        }
    }

    match TicketHistoricoModel::append(db, req.id_ticket, req.status, Some(&req.texto)).await {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketHistoricoResponse::from(entry),
                "Historico created successfully",
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

pub fn historico_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_interaction))
        .route("/ticket/{id_ticket}", get(list_ticket_history))
}
