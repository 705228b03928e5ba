//! HTTP route entry point for `/api/...`.
//!
//! Route groups are organized by domain:
//! - `/health` → liveness probe (public)
//! - `/tickets` → ticket creation, lifecycle transitions, and lookups
//! - `/historicos` → ticket history listing and manual interactions
//! - `/usuarios` → requesting users
//! - `/categorias` → ticket categories
//! - `/colaboradores` → support staff eligible for assignment

use axum::Router;
use util::state::AppState;

pub mod categorias;
pub mod colaboradores;
pub mod common;
pub mod health;
pub mod historicos;
pub mod tickets;
pub mod usuarios;

use categorias::categoria_routes;
use colaboradores::colaborador_routes;
use health::health_routes;
use historicos::historico_routes;
use tickets::ticket_routes;
use usuarios::usuario_routes;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router is fully stated: callers just nest it under their
/// base path and serve it.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/tickets", ticket_routes())
        .nest("/historicos", historico_routes())
        .nest("/usuarios", usuario_routes())
        .nest("/categorias", categoria_routes())
        .nest("/colaboradores", colaborador_routes())
        .with_state(app_state)
}
