use crate::panel_harness::GatewayTestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn destination_update_persists_uri_and_enables_status_queries() {
    let engine = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isCensored": "true",
            "isStreamRunning": 1,
            "state": {"stream": {"running": "live"}, "censorship": {"mode": "bleep"}}
        })))
        .mount(&engine)
        .await;

    let server = GatewayTestServer::start(&engine.uri()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/destination"))
        .json(&json!({"key": "abcd-efgh-ijkl"}))
        .send()
        .await
        .expect("destination update should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let update: Value = response.json().await.expect("update should be json");
    assert_eq!(update["configured"], true);
    assert_eq!(update["masked_secret"], "ab**********kl");
    assert!(update["reload_error"].is_null());

    let persisted = std::fs::read_to_string(server.workspace.path().join("out_uri.txt"))
        .expect("destination uri should be persisted");
    assert_eq!(persisted, "rtmp://a.rtmp.youtube.com/live2/abcd-efgh-ijkl\n");

    let view: Value = client
        .get(server.url("/status.json"))
        .send()
        .await
        .expect("status request should complete")
        .json()
        .await
        .expect("status should be json");
    assert_eq!(view["destination_configured"], true);
    assert_eq!(view["censored"], true);
    assert_eq!(view["stream_running"], true);
    assert_eq!(view["stream_state_label"], "live");
    assert_eq!(view["censorship_state_label"], "bleep");
}

#[tokio::test]
async fn empty_key_clears_destination() {
    let engine = MockServer::start().await;
    let server = GatewayTestServer::start(&engine.uri()).await;
    let client = reqwest::Client::new();

    for key in ["secret-key", ""] {
        let response = client
            .post(server.url("/destination"))
            .json(&json!({"key": key}))
            .send()
            .await
            .expect("destination update should complete");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let persisted = std::fs::read_to_string(server.workspace.path().join("out_uri.txt"))
        .expect("destination uri should be persisted");
    assert_eq!(persisted, "rtmp://a.rtmp.youtube.com/live2/\n");

    let start = client
        .post(server.url("/start"))
        .send()
        .await
        .expect("start request should complete");
    assert_eq!(start.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_destination_body_is_rejected() {
    let engine = MockServer::start().await;
    let server = GatewayTestServer::start(&engine.uri()).await;

    let response = reqwest::Client::new()
        .post(server.url("/destination"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("malformed request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body should be json");
    assert!(
        body.get("error")
            .and_then(Value::as_str)
            .is_some_and(|msg| msg.contains("Invalid body"))
    );
}

#[tokio::test]
async fn destination_accepts_urlencoded_form() {
    let engine = MockServer::start().await;
    let server = GatewayTestServer::start(&engine.uri()).await;

    let response = reqwest::Client::new()
        .post(server.url("/destination"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("key=form-submitted-key")
        .send()
        .await
        .expect("form request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let persisted = std::fs::read_to_string(server.workspace.path().join("out_uri.txt"))
        .expect("destination uri should be persisted");
    assert_eq!(persisted, "rtmp://a.rtmp.youtube.com/live2/form-submitted-key\n");
}
