use api::routes::routes;
use axum::Router;
use db::models::{categoria, colaborador, usuario};
use db::test_utils::setup_test_db;
use util::state::AppState;

/// Builds the full application router over a fresh in-memory database.
///
/// Returns the router plus the state so tests can seed rows directly
/// through the `db` models.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let router = Router::new().nest("/api", routes(app_state.clone()));

    (router, app_state)
}

pub struct SeedData {
    pub usuario: usuario::Model,
    pub categoria: categoria::Model,
    pub colaborador: colaborador::Model,
}

/// Seeds the references every ticket needs: an owning user, a category,
/// and a collaborator to assign.
pub async fn seed_references(app_state: &AppState) -> SeedData {
    let db = app_state.db();

    let usuario = usuario::Model::create(db, "Ana Souza", "ana@example.com", "segredo1")
        .await
        .unwrap();
    let categoria = categoria::Model::create(db, "Infraestrutura", "Rede e servidores")
        .await
        .unwrap();
    let colaborador =
        colaborador::Model::create(db, "Carlos Lima", colaborador::Cargo::N2, "12345678901")
            .await
            .unwrap();

    SeedData {
        usuario,
        categoria,
        colaborador,
    }
}
