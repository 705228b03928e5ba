//! Ticket routes module.
//!
//! Routes:
//! - `POST   /tickets`                      → Create a new ticket (status `aberto`)
//! - `GET    /tickets`                      → List all tickets
//! - `GET    /tickets/{ticket_id}`          → Get one ticket with its history
//! - `PUT    /tickets/{ticket_id}/start`    → aberto → em_andamento
//! - `PUT    /tickets/{ticket_id}/done`     → em_andamento → resolvido
//! - `PUT    /tickets/{ticket_id}/close`    → resolvido → concluido
//! - `PUT    /tickets/{ticket_id}/reopen`   → resolvido → em_andamento

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::{get_ticket, get_tickets};
use post::create_ticket;
use put::{close_ticket, reopen_ticket, resolve_ticket, start_ticket};

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ticket))
        .route("/", get(get_tickets))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/start", put(start_ticket))
        .route("/{ticket_id}/done", put(resolve_ticket))
        .route("/{ticket_id}/close", put(close_ticket))
        .route("/{ticket_id}/reopen", put(reopen_ticket))
}
