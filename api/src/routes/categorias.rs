//! Category routes: list, create, fetch.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::format_validation_errors;
use db::models::categoria::Model as CategoriaModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use uuid::Uuid;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoriaCreateRequest {
    #[validate(length(min = 2, max = 100, message = "nome must be between 2 and 100 characters"))]
    pub nome: String,

    #[validate(length(
        min = 2,
        max = 100,
        message = "descricao must be between 2 and 100 characters"
    ))]
    pub descricao: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriaResponse {
    pub id: Uuid,
    pub nome: String,
    pub descricao: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<CategoriaModel> for CategoriaResponse {
    fn from(categoria: CategoriaModel) -> Self {
        Self {
            id: categoria.id,
            nome: categoria.nome,
            descricao: categoria.descricao,
            created_at: categoria.created_at.to_rfc3339(),
            updated_at: categoria.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

async fn list_categorias(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match CategoriaModel::find_all(db).await {
        Ok(categorias) => {
            let response: Vec<CategoriaResponse> = categorias.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Categorias retrieved successfully",
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

async fn create_categoria(
    State(app_state): State<AppState>,
    Json(req): Json<CategoriaCreateRequest>,
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

    match CategoriaModel::create(db, &req.nome, &req.descricao).await {
        Ok(categoria) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CategoriaResponse::from(categoria),
                "Categoria created successfully",
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

async fn get_categoria(
    State(app_state): State<AppState>,
    Path(categoria_id): Path<Uuid>,
) -> impl IntoResponse {
    let db = app_state.db();

    match CategoriaModel::find_by_id(db, categoria_id).await {
        Ok(Some(categoria)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CategoriaResponse::from(categoria),
                "Categoria retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Categoria not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

pub fn categoria_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categorias))
        .route("/", post(create_categoria))
        .route("/{categoria_id}", get(get_categoria))
}
