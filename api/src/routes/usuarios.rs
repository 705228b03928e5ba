//! Requesting-user routes: list, create, fetch.
//!
//! Users are referenced by tickets as their owners; ticket routes only check
//! existence, so the CRUD here is deliberately thin.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::format_validation_errors;
use db::models::usuario::Model as UsuarioModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use uuid::Uuid;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct UsuarioCreateRequest {
    #[validate(length(min = 2, max = 100, message = "nome must be between 2 and 100 characters"))]
    pub nome: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "senha must be between 6 and 100 characters"))]
    pub senha: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub ativo: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<UsuarioModel> for UsuarioResponse {
    fn from(usuario: UsuarioModel) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
            ativo: usuario.ativo,
            created_at: usuario.created_at.to_rfc3339(),
            updated_at: usuario.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

async fn list_usuarios(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match UsuarioModel::find_all(db).await {
        Ok(usuarios) => {
            let response: Vec<UsuarioResponse> = usuarios.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Usuarios retrieved successfully",
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

async fn create_usuario(
    State(app_state): State<AppState>,
    Json(req): Json<UsuarioCreateRequest>,
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

    match UsuarioModel::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    "A usuario with this email already exists",
                )),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response();
        }
    }

    match UsuarioModel::create(db, &req.nome, &req.email, &req.senha).await {
        Ok(usuario) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UsuarioResponse::from(usuario),
                "Usuario created successfully",
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

async fn get_usuario(
    State(app_state): State<AppState>,
    Path(usuario_id): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UsuarioModel::find_by_id(db, usuario_id).await {
        Ok(Some(usuario)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UsuarioResponse::from(usuario),
                "Usuario retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Usuario not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

pub fn usuario_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios))
        .route("/", post(create_usuario))
        .route("/{usuario_id}", get(get_usuario))
}
