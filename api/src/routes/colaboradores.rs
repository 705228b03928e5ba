//! Collaborator (support staff) routes: list, create, fetch, update, delete.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use common::format_validation_errors;
use db::models::colaborador::{Cargo, Model as ColaboradorModel};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use uuid::Uuid;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ColaboradorCreateRequest {
    #[validate(length(min = 3, max = 100, message = "nome must be between 3 and 100 characters"))]
    pub nome: String,

    pub cargo: Cargo,

    #[validate(length(equal = 11, message = "cpf must be exactly 11 digits"))]
    pub cpf: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ColaboradorUpdateRequest {
    #[validate(length(min = 3, max = 100, message = "nome must be between 3 and 100 characters"))]
    pub nome: Option<String>,

    pub cargo: Option<Cargo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ColaboradorResponse {
    pub id: Uuid,
    pub nome: String,
    pub cargo: String,
    pub cpf: String,
    pub created_at: String,
}

impl From<ColaboradorModel> for ColaboradorResponse {
    fn from(colaborador: ColaboradorModel) -> Self {
        Self {
            id: colaborador.id,
            nome: colaborador.nome,
            cargo: colaborador.cargo.to_string(),
            cpf: colaborador.cpf,
            created_at: colaborador.created_at.to_rfc3339(),
        }
    }
}

async fn list_colaboradores(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match ColaboradorModel::find_all(db).await {
        Ok(colaboradores) => {
            let response: Vec<ColaboradorResponse> =
                colaboradores.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Colaboradores retrieved successfully",
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

async fn create_colaborador(
    State(app_state): State<AppState>,
    Json(req): Json<ColaboradorCreateRequest>,
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

    match ColaboradorModel::create(db, &req.nome, req.cargo, &req.cpf).await {
        Ok(colaborador) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ColaboradorResponse::from(colaborador),
                "Colaborador created successfully",
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

async fn get_colaborador(
    State(app_state): State<AppState>,
    Path(colaborador_id): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ColaboradorModel::find_by_id(db, colaborador_id).await {
        Ok(Some(colaborador)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ColaboradorResponse::from(colaborador),
                "Colaborador retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Colaborador not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

async fn update_colaborador(
    State(app_state): State<AppState>,
    Path(colaborador_id): Path<Uuid>,
    Json(req): Json<ColaboradorUpdateRequest>,
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

    match ColaboradorModel::find_by_id(db, colaborador_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Colaborador not found")),
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

    match ColaboradorModel::edit(db, colaborador_id, req.nome.as_deref(), req.cargo).await {
        Ok(colaborador) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ColaboradorResponse::from(colaborador),
                "Colaborador updated successfully",
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

async fn delete_colaborador(
    State(app_state): State<AppState>,
    Path(colaborador_id): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ColaboradorModel::delete(db, colaborador_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Colaborador not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

pub fn colaborador_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_colaboradores))
        .route("/", post(create_colaborador))
        .route("/{colaborador_id}", get(get_colaborador))
        .route("/{colaborador_id}", put(update_colaborador))
        .route("/{colaborador_id}", delete(delete_colaborador))
}
