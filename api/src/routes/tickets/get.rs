use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::ticket::Model as TicketModel;
use util::state::AppState;
use uuid::Uuid;

use crate::response::ApiResponse;
use crate::routes::tickets::common::{TicketResponse, ticket_with_history};

/// GET /api/tickets
///
/// Lists all tickets. History is not expanded here; use the single-ticket
/// endpoint or `/historicos/ticket/{id}` for that.
pub async fn get_tickets(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match TicketModel::find_all(db).await {
        Ok(tickets) => {
            let response: Vec<TicketResponse> = tickets.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Tickets retrieved successfully",
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

/// GET /api/tickets/{ticket_id}
///
/// Fetches one ticket with its full history, newest entry first.
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match TicketModel::find_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => {
            ticket_with_history(db, StatusCode::OK, ticket, "Ticket retrieved successfully").await
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Ticket not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}
