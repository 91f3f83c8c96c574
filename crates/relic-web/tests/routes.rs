//! Integration tests for the Relic web routes.
//!
//! The router is built with an offline analyzer, so no test reaches the network.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use relic_core::Config;
use serde_json::{json, Value};
use tower::ServiceExt;

use relic_web::{create_router, state::AppState};

const BOUNDARY: &str = "relic-test-boundary";

fn create_test_router() -> Router {
    create_router(AppState::offline(Config::default()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(json!(null)))
}

/// Build a multipart body from (name, file name, content) parts.
fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes()),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_multipart(router: &Router, uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// PNG signature followed by an IHDR chunk.
fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes
}

// ============================================================
// Pages
// ============================================================

#[tokio::test]
async fn test_index_renders_form() {
    let router = create_test_router();
    let (status, html) = get(&router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Historical Artifact Analyzer"));
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(html.contains("Cloud analysis disabled"));
}

#[tokio::test]
async fn test_health() {
    let router = create_test_router();
    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_form_analysis_renders_report() {
    let router = create_test_router();
    let (status, html) = post_multipart(
        &router,
        "/analyze",
        &[("notes", None, b"Bronze coin, Roman, 2 cm, found near Ostia".as_slice())],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Artifact Summary (Offline Heuristic)</h1>"));
    assert!(html.contains("Cloud analysis not configured"));
    assert!(html.contains("action=\"/report/download\""));
    assert!(html.contains("Download artifact_report.md"));
}

#[tokio::test]
async fn test_form_analysis_with_bad_image_warns_and_continues() {
    let router = create_test_router();
    let (status, html) = post_multipart(
        &router,
        "/analyze",
        &[
            ("notes", None, b"Clay amphora".as_slice()),
            ("image", Some("photo.gif"), b"GIF89a not supported".as_slice()),
            ("offline", None, b"on".as_slice()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("The image could not be used"));
    assert!(html.contains("Offline analysis requested"));
    assert!(html.contains("Artifact Summary"));
}

#[tokio::test]
async fn test_form_analysis_shows_image_dimensions() {
    let router = create_test_router();
    let image = png_header(640, 480);
    let (status, html) = post_multipart(&router, "/analyze", &[("image", Some("vase.png"), image.as_slice())]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("640×480"));
    assert!(!html.contains("The image could not be used"));
}

#[tokio::test]
async fn test_empty_file_field_is_ignored() {
    let router = create_test_router();
    let (status, html) = post_multipart(
        &router,
        "/analyze",
        &[("notes", None, b"Iron sword".as_slice()), ("image", Some(""), b"".as_slice())],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("The image could not be used"));
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let config = Config {
        max_upload_bytes: 1024 * 1024,
        ..Config::default()
    };
    let router = create_router(AppState::offline(config));

    let mut image = png_header(4000, 3000);
    image.resize(2 * 1024 * 1024, 0);
    let (status, _) = post_multipart(&router, "/analyze", &[("image", Some("large.png"), image.as_slice())]).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================
// Report download
// ============================================================

#[tokio::test]
async fn test_download_sets_attachment_headers() {
    let router = create_test_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/report/download")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("report=%23+Title%0A%0ABody+text"))
        .unwrap();
    let (status, headers, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/markdown; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"artifact_report.md\""
    );
    assert_eq!(&body[..], b"# Title\n\nBody text");
}

#[tokio::test]
async fn test_download_rejects_empty_report() {
    let router = create_test_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/report/download")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("report=+"))
        .unwrap();
    let (status, _, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================
// JSON API
// ============================================================

#[tokio::test]
async fn test_api_analyze_without_key_returns_heuristic() {
    let router = create_test_router();
    let (status, body) = post_json(&router, "/api/analyze", json!({ "notes": "Marble statue head, Greek" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"]["kind"], "heuristic");
    assert!(!body["report"].as_str().unwrap().trim().is_empty());
    assert_eq!(body["notice"]["kind"], "missing_credential");
    assert!(body.get("warnings").is_none());
}

#[tokio::test]
async fn test_api_analyze_offline() {
    let router = create_test_router();
    let (status, body) = post_json(&router, "/api/analyze", json!({ "notes": "Glass bead", "offline": true })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"]["kind"], Value::Null);
    assert_eq!(body["notice"]["title"], "Offline analysis requested");
}

#[tokio::test]
async fn test_api_analyze_with_image() {
    let router = create_test_router();
    let encoded = format!("data:image/png;base64,{}", STANDARD.encode(png_header(300, 900)));
    let (status, body) = post_json(&router, "/api/analyze", json!({ "notes": "", "image_base64": encoded })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"]["format"], "PNG");
    assert_eq!(body["image"]["width"], 300);
    assert_eq!(body["image"]["height"], 900);
}

#[tokio::test]
async fn test_api_bad_base64_is_a_warning() {
    let router = create_test_router();
    let (status, body) = post_json(
        &router,
        "/api/analyze",
        json!({ "notes": "Silver ring", "image_base64": "%%% not base64 %%%" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    assert!(body.get("image").is_none());
    assert!(!body["report"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_malformed_json_is_rejected() {
    let router = create_test_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/analyze")
        .header("Content-Type", "application/json")
        .body(Body::from("{"))
        .unwrap();
    let (status, _, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_status_without_key() {
    let router = create_test_router();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/status")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&router, request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cloud_configured"], false);
    assert_eq!(body["selected_model"], Value::Null);
    assert_eq!(body["available_models"], json!([]));
    assert_eq!(body["models_detected"], false);
}
