mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use helpers::make_test_app;

#[tokio::test]
async fn create_and_fetch_usuario() {
    let (app, _app_state) = make_test_app().await;

    let body = json!({
        "nome": "Ana Souza",
        "email": "ana@example.com",
        "senha": "segredo1"
    });

    let req = Request::builder()
        .method("POST")
        .uri("/api/usuarios")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["nome"], "Ana Souza");
    assert_eq!(json["data"]["ativo"], true);

    let id = json["data"]["id"].as_str().unwrap().to_owned();
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/usuarios/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (app, _app_state) = make_test_app().await;

    let body = json!({
        "nome": "Ana Souza",
        "email": "ana@example.com",
        "senha": "segredo1"
    });

    let req = Request::builder()
        .method("POST")
        .uri("/api/usuarios")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let req = Request::builder()
        .method("POST")
        .uri("/api/usuarios")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "A usuario with this email already exists");
}

#[tokio::test]
async fn unknown_usuario_is_404() {
    let (app, _app_state) = make_test_app().await;

    let id = uuid::Uuid::new_v4();
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/usuarios/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
