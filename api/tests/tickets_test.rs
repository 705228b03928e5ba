mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use helpers::{SeedData, make_test_app, seed_references};

async fn send(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn create_ticket(app: &Router, seed: &SeedData) -> Value {
    let body = json!({
        "titulo": "VPN fora do ar",
        "descricao": "Ninguém do financeiro consegue conectar na VPN",
        "id_usuario": seed.usuario.id,
        "id_categoria": seed.categoria.id,
        "prioridade": "urgente"
    });

    let (status, json) = send(app, "POST", "/api/tickets", body).await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"].clone()
}

fn start_body(seed: &SeedData) -> Value {
    json!({
        "id_responsavel": seed.colaborador.id,
        "tempo_estimado": 3,
        "observacoes_iniciais": "Verificando logs do concentrador VPN e reiniciando o serviço"
    })
}

fn done_body() -> Value {
    json!({
        "solucao_aplicada": "Certificado do concentrador VPN estava expirado. Certificado renovado, \
                             serviço reiniciado e conexão validada com três usuários do financeiro.",
        "observacoes_internas": null
    })
}

fn close_body() -> Value {
    json!({
        "avaliacao": 5,
        "comentario_avaliacao": "Ótimo atendimento",
        "comentario_confirmacao_usuario": "Confirmo que a VPN voltou a funcionar para toda a equipe"
    })
}

#[tokio::test]
async fn create_ticket_starts_aberto_with_one_history_entry() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;

    let ticket = create_ticket(&app, &seed).await;

    assert_eq!(ticket["status"], "aberto");
    assert_eq!(ticket["prioridade"], "urgente");
    assert_eq!(ticket["historicos"].as_array().unwrap().len(), 1);
    assert_eq!(ticket["historicos"][0]["status"], "aberto");
}

#[tokio::test]
async fn create_ticket_with_unknown_usuario_is_404() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;

    let body = json!({
        "titulo": "VPN fora do ar",
        "descricao": "Ninguém do financeiro consegue conectar na VPN",
        "id_usuario": uuid::Uuid::new_v4(),
        "id_categoria": seed.categoria.id,
        "prioridade": "baixa"
    });

    let (status, json) = send(&app, "POST", "/api/tickets", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Usuario not found");
}

#[tokio::test]
async fn create_ticket_with_short_titulo_is_400() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;

    let body = json!({
        "titulo": "VPN",
        "descricao": "Ninguém do financeiro consegue conectar na VPN",
        "id_usuario": seed.usuario.id,
        "id_categoria": seed.categoria.id,
        "prioridade": "baixa"
    });

    let (status, json) = send(&app, "POST", "/api/tickets", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn start_moves_ticket_to_em_andamento() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "em_andamento");
    assert_eq!(json["data"]["tempo_estimado"], 3);
    assert_eq!(json["data"]["historicos"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["historicos"][0]["status"], "em_andamento");
}

#[tokio::test]
async fn start_with_out_of_range_estimate_is_400() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    let body = json!({
        "id_responsavel": seed.colaborador.id,
        "tempo_estimado": 10,
        "observacoes_iniciais": "Verificando logs do concentrador VPN e reiniciando o serviço"
    });

    let (status, json) = send(&app, "PUT", &format!("/api/tickets/{id}/start"), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "tempo_estimado must be between 1 and 7 days"
    );
}

#[tokio::test]
async fn done_from_aberto_is_rejected() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    let (status, json) = send(&app, "PUT", &format!("/api/tickets/{id}/done"), done_body()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("aberto"));
    assert!(message.contains("em_andamento"));
}

#[tokio::test]
async fn full_lifecycle_reaches_concluido_with_four_history_entries() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "PUT", &format!("/api/tickets/{id}/done"), done_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "resolvido");
    assert_eq!(json["data"]["historicos"].as_array().unwrap().len(), 3);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/close"),
        close_body(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "concluido");
    assert_eq!(json["data"]["avaliacao"], 5);
    assert_eq!(json["data"]["historicos"].as_array().unwrap().len(), 4);

    // Terminal state: nothing starts a concluded ticket again.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn close_requires_resolvido() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/close"),
        close_body(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reopen_returns_to_em_andamento_and_resolve_works_again() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;
    send(&app, "PUT", &format!("/api/tickets/{id}/done"), done_body()).await;

    let reopen = json!({
        "reabertura_motivo": "não resolvido",
        "reabertura_detalhes": "a conexão ainda cai depois de alguns minutos"
    });
    let (status, json) = send(&app, "PUT", &format!("/api/tickets/{id}/reopen"), reopen).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "em_andamento");
    assert_eq!(json["data"]["reabertura_motivo"], "não resolvido");
    // Resolution fields survive the reopen.
    assert!(json["data"]["solucao_aplicada"].is_string());

    let (status, json) = send(&app, "PUT", &format!("/api/tickets/{id}/done"), done_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "resolvido");
    assert_eq!(json["data"]["historicos"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn transition_on_unknown_ticket_is_404() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;

    let id = uuid::Uuid::new_v4();
    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Ticket not found");
}

#[tokio::test]
async fn get_ticket_includes_history_newest_first() {
    let (app, app_state) = make_test_app().await;
    let seed = seed_references(&app_state).await;
    let ticket = create_ticket(&app, &seed).await;
    let id = ticket["id"].as_str().unwrap().to_owned();

    send(
        &app,
        "PUT",
        &format!("/api/tickets/{id}/start"),
        start_body(&seed),
    )
    .await;

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/tickets/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let historicos = json["data"]["historicos"].as_array().unwrap();
    assert_eq!(historicos.len(), 2);
    assert_eq!(historicos[0]["status"], "em_andamento");
    assert_eq!(historicos[1]["status"], "aberto");
}
