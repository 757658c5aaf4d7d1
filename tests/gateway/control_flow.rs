use crate::panel_harness::GatewayTestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn engine_with_status(status: Value) -> MockServer {
    let engine = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(&engine)
        .await;
    engine
}

#[tokio::test]
async fn censor_toggle_is_forwarded_once_then_locked() {
    let engine = engine_with_status(json!({"isCensored": false})).await;
    Mock::given(method("PATCH"))
        .and(path("/status"))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({"isCensored": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&engine)
        .await;

    let server = GatewayTestServer::start(&engine.uri()).await;
    let client = reqwest::Client::new();

    let first = client
        .post(server.url("/censor_on"))
        .send()
        .await
        .expect("first toggle should complete");
    assert_eq!(first.status(), StatusCode::OK);
    let first_body: Value = first.json().await.expect("toggle response should be json");
    assert_eq!(first_body, json!({"outcome": "applied", "censored": true}));

    let second = client
        .post(server.url("/censor_off"))
        .send()
        .await
        .expect("second toggle should complete");
    assert_eq!(second.status(), StatusCode::LOCKED);
    let second_body: Value = second.json().await.expect("lock response should be json");
    assert_eq!(second_body["outcome"], "locked");
    let remaining = second_body["seconds_remaining"]
        .as_u64()
        .expect("seconds_remaining should be a number");
    assert!((1..=15).contains(&remaining));

    let persisted = std::fs::read_to_string(server.workspace.path().join("censor_toggle_ts"))
        .expect("toggle timestamp should be persisted");
    assert!(!persisted.trim().is_empty());

    engine.verify().await;
}

#[tokio::test]
async fn status_json_skips_engine_until_destination_is_set() {
    let engine = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isCensored": true})))
        .expect(0)
        .mount(&engine)
        .await;

    let server = GatewayTestServer::start(&engine.uri()).await;
    let view: Value = reqwest::get(server.url("/status.json"))
        .await
        .expect("status request should complete")
        .json()
        .await
        .expect("status should be json");

    assert_eq!(view["destination_configured"], false);
    assert_eq!(view["censored"], false);
    assert_eq!(view["locked"], false);
    assert_eq!(view["progress_percent"], 100);
    assert!(view["fetch_error"].is_null());

    engine.verify().await;
}

#[tokio::test]
async fn stream_start_refused_without_destination() {
    let engine = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&engine)
        .await;

    let server = GatewayTestServer::start(&engine.uri()).await;
    let response = reqwest::Client::new()
        .post(server.url("/start"))
        .send()
        .await
        .expect("start request should complete");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    engine.verify().await;
}

#[tokio::test]
async fn engine_failure_surfaces_as_bad_gateway() {
    let engine = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("engine restarting"))
        .mount(&engine)
        .await;

    let server = GatewayTestServer::start(&engine.uri()).await;
    let response = reqwest::Client::new()
        .post(server.url("/stop"))
        .send()
        .await
        .expect("stop request should complete");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("error body should be json");
    assert_eq!(body["outcome"], "patch_failed");
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("503"));
    assert!(!error.contains("test-key"));
}
