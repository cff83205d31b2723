//! Integration tests for the HTTP API.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeMailer, FakeSearch, temp_store};
use docket_watch::config::Config;
use docket_watch::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "test-admin-token";

struct TestApp {
    router: Router,
    search: Arc<FakeSearch>,
    mailer: Arc<FakeMailer>,
}

async fn spawn_app(prefix: &str) -> TestApp {
    let mut config = Config::default();
    config.server.admin_token = ADMIN_TOKEN.to_string();

    let store = temp_store(prefix).await;
    let search = Arc::new(FakeSearch::default());
    let mailer = Arc::new(FakeMailer::default());

    let shared = SharedState::with_clients(config, store, search.clone(), mailer.clone());
    let state = docket_watch::api::create_app_state(Arc::new(shared), None);

    TestApp {
        router: docket_watch::api::router(state),
        search,
        mailer,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn new_case(number: &str) -> Value {
    json!({
        "case_number": number,
        "tribunal_alias": "api_publica_tjsp",
        "recipient_email": "lawyer@example.com"
    })
}

#[tokio::test]
async fn test_create_and_list_cases() {
    let app = spawn_app("api-create").await;

    let (status, body) = send(&app.router, post_json("/v1/cases", &new_case(" 0001 "))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["data"]["case_number"], "0001");
    assert!(body["data"]["last_fingerprint"].is_null());

    send(&app.router, post_json("/v1/cases", &new_case("0002"))).await;

    let (status, body) = send(&app.router, get("/v1/cases")).await;
    assert_eq!(status, StatusCode::OK);
    let cases = body["data"].as_array().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0]["case_number"], "0001");
    assert_eq!(cases[1]["case_number"], "0002");
}

#[tokio::test]
async fn test_duplicate_case_conflicts() {
    let app = spawn_app("api-dup").await;

    let (status, _) = send(&app.router, post_json("/v1/cases", &new_case("0001"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.router, post_json("/v1/cases", &new_case("0001"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_invalid_case_is_rejected() {
    let app = spawn_app("api-invalid").await;

    let bad = json!({
        "case_number": "0001",
        "tribunal_alias": "TJ SP",
        "recipient_email": "lawyer@example.com"
    });
    let (status, body) = send(&app.router, post_json("/v1/cases", &bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("tribunal_alias"));

    let bad_email = json!({
        "case_number": "0001",
        "tribunal_alias": "tjsp",
        "recipient_email": "nobody"
    });
    let (status, _) = send(&app.router, post_json("/v1/cases", &bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sync_requires_admin_token() {
    let app = spawn_app("api-sync-auth").await;

    let (status, _) = send(&app.router, post_json("/v1/sync", &json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        post_json("/v1/sync?admin_token=wrong", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.search.calls(), 0);

    let request = Request::builder()
        .method("POST")
        .uri("/v1/sync")
        .header("X-Admin-Token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["changed"], 0);
}

#[tokio::test]
async fn test_sync_runs_and_history_is_listed() {
    let app = spawn_app("api-sync").await;

    let (_, created) = send(&app.router, post_json("/v1/cases", &new_case("0001"))).await;
    let id = created["data"]["id"].as_i64().unwrap();

    app.search.respond(
        "api_publica_tjsp",
        "0001",
        json!({
            "movimentos": [
                { "dataHora": "2024-01-01T09:00:00Z", "nome": "Distribuição" },
                { "dataHora": "2024-02-01T15:00:00Z", "nome": "Decisão", "complemento": "Deferido" }
            ]
        }),
    );

    let (status, body) = send(
        &app.router,
        post_json(&format!("/v1/sync?admin_token={ADMIN_TOKEN}"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["changed"], 1);
    assert_eq!(body["data"]["digests_sent"], 1);
    assert_eq!(body["data"]["cases"][0]["status"], "changed");
    assert_eq!(body["data"]["cases"][0]["latest_title"], "Decisão");
    assert_eq!(app.mailer.sent().len(), 2);

    let (status, body) = send(&app.router, get(&format!("/v1/cases/{id}/movements"))).await;
    assert_eq!(status, StatusCode::OK);
    let movements = body["data"].as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["title"], "Decisão");
    assert_eq!(movements[0]["description"], "Deferido");
    assert_eq!(movements[0]["occurred_at"], "2024-02-01T15:00:00+00:00");
}

#[tokio::test]
async fn test_movements_for_unknown_case() {
    let app = spawn_app("api-unknown").await;

    let (status, _) = send(&app.router, get("/v1/cases/999/movements")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app.router, get("/v1/cases/0/movements")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app.router, get("/v1/cases/1/movements?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app("api-health").await;

    let (status, body) = send(&app.router, get("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = send(&app.router, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}
