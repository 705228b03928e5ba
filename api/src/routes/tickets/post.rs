use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::categoria::Model as CategoriaModel;
use db::models::ticket::Model as TicketModel;
use db::models::usuario::Model as UsuarioModel;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::tickets::common::{
    TicketCreateRequest, lifecycle_error_response, ticket_with_history,
};

/// POST /api/tickets
///
/// Creates a ticket in status `aberto`. The first history entry is written
/// in the same transaction, so a freshly created ticket is never visible
/// with an empty history.
///
/// Fails with 400 on payload constraint violations and 404 if the owning
/// user or the category does not exist.
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Json(req): Json<TicketCreateRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    // Referential checks before any write; the engine assumes they passed.
    match UsuarioModel::find_by_id(db, req.id_usuario).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Usuario not found")),
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

    match CategoriaModel::find_by_id(db, req.id_categoria).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Categoria not found")),
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

    match TicketModel::create(
        db,
        &req.titulo,
        &req.descricao,
        req.prioridade,
        req.id_usuario,
        req.id_categoria,
    )
    .await
    {
        Ok(ticket) => {
            ticket_with_history(
                db,
                StatusCode::CREATED,
                ticket,
                "Ticket created successfully",
            )
            .await
        }
        Err(e) => lifecycle_error_response(e),
    }
}
