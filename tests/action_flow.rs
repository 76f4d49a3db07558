//! Webhook-level tests for the custom-action endpoint.
//!
//! Exercises signature enforcement and the form dialogue sequence over
//! HTTP using axum-test, with wiremock standing in for both APIs.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use b2bridge::config::{ActionsConfig, B2Config, Config, FrameIoConfig, ServerConfig};
use b2bridge::{api, AppState};

type HmacSha256 = Hmac<Sha256>;

const SECRET: &str = "test-signing-secret";

// ============================================================================
// Test Setup Helpers
// ============================================================================

fn test_config(frameio_url: &str, b2_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        frameio: FrameIoConfig {
            token: "test-token".to_string(),
            base_url: frameio_url.to_string(),
        },
        b2: B2Config {
            key_id: "key".to_string(),
            application_key: "app-key".to_string(),
            bucket_id: "bucket-id".to_string(),
            bucket_name: "test-bucket".to_string(),
            base_url: b2_url.to_string(),
        },
        actions: ActionsConfig {
            signing_secret: SECRET.to_string(),
            upload_path: "exports/".to_string(),
            download_path: "b2_imports".to_string(),
        },
    }
}

fn build_test_app(config: &Config) -> TestServer {
    let state = AppState::new(config);
    let app = Router::new().merge(api::routes()).with_state(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Sign a body the way Frame.io does: HMAC over `"v0:{ts}:{body}"`.
fn sign(timestamp: i64, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(format!("v0:{}:{}", timestamp, body).as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

/// POST a signed callback body.
async fn post_signed(server: &TestServer, body: &Value) -> axum_test::TestResponse {
    let body = body.to_string();
    let ts = Utc::now().timestamp();
    server
        .post("/actions/frameio")
        .add_header(
            HeaderName::from_static("x-frameio-request-timestamp"),
            HeaderValue::from_str(&ts.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-frameio-signature"),
            HeaderValue::from_str(&sign(ts, &body)).unwrap(),
        )
        .text(body)
        .await
}

// ============================================================================
// Signature enforcement
// ============================================================================

#[tokio::test]
async fn unsigned_callback_is_forbidden() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    let response = server
        .post("/actions/frameio")
        .text(json!({ "type": "import-export", "resource": { "id": "x" } }).to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn stale_callback_is_forbidden() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    let body = json!({ "type": "import-export", "resource": { "id": "x" } }).to_string();
    let ts = Utc::now().timestamp() - 600;
    let response = server
        .post("/actions/frameio")
        .add_header(
            HeaderName::from_static("x-frameio-request-timestamp"),
            HeaderValue::from_str(&ts.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-frameio-signature"),
            HeaderValue::from_str(&sign(ts, &body)).unwrap(),
        )
        .text(body)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tampered_body_is_forbidden() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    let signed = json!({ "type": "import-export", "resource": { "id": "x" } }).to_string();
    let sent = json!({ "type": "import-export", "resource": { "id": "y" } }).to_string();
    let ts = Utc::now().timestamp();
    let response = server
        .post("/actions/frameio")
        .add_header(
            HeaderName::from_static("x-frameio-request-timestamp"),
            HeaderValue::from_str(&ts.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-frameio-signature"),
            HeaderValue::from_str(&sign(ts, &signed)).unwrap(),
        )
        .text(sent)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Dialogue sequence
// ============================================================================

#[tokio::test]
async fn dialogue_walks_from_copytype_to_depth() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    // First callback: no answers yet.
    let response = post_signed(
        &server,
        &json!({ "type": "import-export", "data": null, "resource": { "id": "x" } }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let form: Value = response.json();
    assert_eq!(form["fields"][0]["name"], "copytype");
    assert_eq!(form["fields"][0]["type"], "select");

    // Second callback: export chosen.
    let response = post_signed(
        &server,
        &json!({
            "type": "import-export",
            "data": { "copytype": "export" },
            "resource": { "id": "x" },
        }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let form: Value = response.json();
    assert_eq!(form["fields"][0]["name"], "depth");
}

#[tokio::test]
async fn import_question_names_the_bucket() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    let response = post_signed(
        &server,
        &json!({
            "type": "import-export",
            "data": { "copytype": "import" },
            "resource": { "id": "x" },
        }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let form: Value = response.json();
    assert_eq!(form["fields"][0]["name"], "b2path");
    assert_eq!(form["fields"][0]["type"], "text");
    assert!(form["description"].as_str().unwrap().contains("test-bucket"));
}

// ============================================================================
// Full export round trip
// ============================================================================

#[tokio::test]
async fn completed_dialogue_runs_the_export() {
    let frameio = MockServer::start().await;
    let b2 = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets/asset1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "asset1",
            "type": "file",
            "name": "clip.mov",
            "filesize": 4,
            "original": format!("{}/src/clip", frameio.uri()),
        })))
        .mount(&frameio)
        .await;
    Mock::given(method("GET"))
        .and(path("/src/clip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
        .mount(&frameio)
        .await;

    Mock::given(method("GET"))
        .and(path("/b2api/v2/b2_authorize_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiUrl": b2.uri(),
            "downloadUrl": b2.uri(),
            "authorizationToken": "session-token",
        })))
        .mount(&b2)
        .await;
    Mock::given(method("POST"))
        .and(path("/b2api/v2/b2_get_upload_url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": format!("{}/upload", b2.uri()),
            "authorizationToken": "upload-token",
        })))
        .mount(&b2)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileName": "clip.mov",
            "action": "upload",
        })))
        .mount(&b2)
        .await;

    let config = test_config(&frameio.uri(), &b2.uri());
    let server = build_test_app(&config);

    let response = post_signed(
        &server,
        &json!({
            "type": "import-export",
            "data": { "copytype": "export", "depth": "asset" },
            "resource": { "id": "asset1" },
        }),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let reports: Value = response.json();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["name"], "clip.mov");
    assert_eq!(reports[0]["status"], "fulfilled");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_endpoint_is_public() {
    let config = test_config("http://frameio.invalid", "http://b2.invalid");
    let server = build_test_app(&config);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
