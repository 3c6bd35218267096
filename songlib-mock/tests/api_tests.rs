//! Integration tests for songlib-mock API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Paginated listing and query fallbacks
//! - Create / get / update / delete round trips
//! - Error bodies (`{message}`) for 404 and 400

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use songlib_mock::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app seeded with `count` fixture songs
fn setup_app(count: usize) -> axum::Router {
    build_router(AppState::seeded(count, 42))
}

/// Test helper: Send one request and return status + parsed JSON body (if any)
async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
    let mut request = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json_body) => {
            request = request.header("content-type", "application/json");
            request.body(Body::from(json_body.to_string())).unwrap()
        }
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let json_body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).expect("Should parse JSON"))
    };

    (status, json_body)
}

fn new_song_body() -> Value {
    json!({
        "title": "New Song",
        "artist": "New Artist",
        "album": "New Album",
        "year": 2023,
        "genre": "Pop",
        "duration": 200
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(0);
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "songlib-mock");
    assert!(body["version"].is_string());
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_default_window() {
    let app = setup_app(50);
    let (status, body) = send(&app, "GET", "/api/songs", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["pagination"],
        json!({
            "page": 1,
            "limit": 10,
            "total": 50,
            "totalPages": 5,
            "hasNext": true,
            "hasPrev": false
        })
    );
}

#[tokio::test]
async fn test_list_last_partial_page() {
    let app = setup_app(23);
    let (status, body) = send(&app, "GET", "/api/songs?page=3&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);
}

#[tokio::test]
async fn test_list_page_past_end_is_empty() {
    let app = setup_app(5);
    let (status, body) = send(&app, "GET", "/api/songs?page=9&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["page"], 9);
}

#[tokio::test]
async fn test_list_junk_query_falls_back_to_defaults() {
    let app = setup_app(15);
    let (status, body) = send(&app, "GET", "/api/songs?page=abc&limit=zero", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
}

// =============================================================================
// Create / get / update / delete
// =============================================================================

#[tokio::test]
async fn test_create_then_get() {
    let app = setup_app(0);

    let (status, body) = send(&app, "POST", "/api/songs", Some(new_song_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = body.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, body) = send(&app, "GET", &format!("/api/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["title"], "New Song");
}

#[tokio::test]
async fn test_create_appends_to_server_order() {
    let app = setup_app(3);
    let (_, body) = send(&app, "POST", "/api/songs", Some(new_song_body())).await;
    let id = body.unwrap()["id"].clone();

    let (_, body) = send(&app, "GET", "/api/songs?page=1&limit=10", None).await;
    let body = body.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data[3]["id"], id);
    assert_eq!(body["pagination"]["total"], 4);
}

#[tokio::test]
async fn test_create_missing_fields_is_bad_request() {
    let app = setup_app(0);
    let mut body = new_song_body();
    body["title"] = json!("");

    let (status, body) = send(&app, "POST", "/api/songs", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body.unwrap()["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("Validation error"), "got {}", message);
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request_with_message() {
    let app = setup_app(0);
    let (status, body) = send(&app, "POST", "/api/songs", Some(json!({ "title": 5 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["message"].is_string());
}

#[tokio::test]
async fn test_update_merges_partial_fields() {
    let app = setup_app(0);
    let (_, body) = send(&app, "POST", "/api/songs", Some(new_song_body())).await;
    let created = body.unwrap();
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/songs/{}", id),
        Some(json!({ "title": "Renamed", "duration": 61 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = body.unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["duration"], 61);
    assert_eq!(updated["artist"], "New Artist");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = setup_app(0);
    let (_, body) = send(&app, "POST", "/api/songs", Some(new_song_body())).await;
    let id = body.unwrap()["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/api/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (status, body) = send(&app, "GET", &format!("/api/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Song not found");
}

#[tokio::test]
async fn test_unknown_id_is_not_found_for_each_method() {
    let app = setup_app(2);

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({ "title": "x" }))),
        ("DELETE", None),
    ] {
        let (status, body) = send(&app, method, "/api/songs/does-not-exist", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        assert_eq!(body.unwrap()["message"], "Song not found", "{}", method);
    }
}
