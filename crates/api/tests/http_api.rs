//! In-process tests for the public HTTP surface.
//!
//! Requests are issued through the composed router over the in-memory
//! store, so these tests cover the same path external clients use without
//! requiring a running database.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use wantmarket_api::config::ApiConfig;
use wantmarket_api::routes;
use wantmarket_api::state::AppState;
use wantmarket_api::store::MemoryStore;
use wantmarket_core::RecordId;

/// Build a router over a fresh in-memory store.
fn app() -> Router {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        sentry_dsn: None,
    };
    routes::router(AppState::new(config, Arc::new(MemoryStore::new())))
}

/// Send a request and decode the JSON response body.
async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, kind: &str, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/identities",
        Some(json!({"kind": kind, "username": username, "password": password})),
    )
    .await
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_fresh_id() {
    let app = app();

    let (status, body) = register(&app, "vendor", "vendor123", "securepassword").await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body.get("id").and_then(Value::as_str).unwrap();
    assert!(RecordId::parse(id).is_ok());
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let app = app();

    let payloads = [
        json!({}),
        json!({"kind": "vendor", "username": "u"}),
        json!({"kind": "vendor", "username": "", "password": "p"}),
        json!({"kind": "", "username": "u", "password": "p"}),
    ];
    for payload in payloads {
        let (status, body) = send(&app, "POST", "/identities", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("all fields (kind, username, password) are required")
        );
    }
}

#[tokio::test]
async fn test_register_rejects_unknown_kind() {
    let app = app();

    let (status, body) = register(&app, "vendors", "vendor123", "securepassword").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("kind must be either 'wanter' or 'vendor'")
    );
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = app();
    register(&app, "vendor", "vendor123", "securepassword").await;

    // Same partition: conflict, whatever the password.
    let (status, body) = register(&app, "vendor", "vendor123", "otherpassword").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("username is already taken")
    );

    // Other partition: allowed.
    let (status, _) = register(&app, "wanter", "vendor123", "securepassword").await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_token_is_registered_id() {
    let app = app();
    let (_, body) = register(&app, "vendor", "vendor123", "securepassword").await;
    let id = body.get("id").and_then(Value::as_str).unwrap().to_owned();

    let (status, body) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({"username": "vendor123", "password": "securepassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("token").and_then(Value::as_str), Some(id.as_str()));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = app();
    register(&app, "vendor", "vendor123", "securepassword").await;

    let payloads = [
        json!({"username": "vendor123", "password": "wrong"}),
        json!({"username": "nobody", "password": "securepassword"}),
        json!({"username": "vendor123"}),
        json!({}),
    ];
    for payload in payloads {
        let (status, body) = send(&app, "POST", "/sessions", Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        // The body must not reveal which field was wrong.
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("invalid credentials")
        );
    }
}

#[tokio::test]
async fn test_login_prefers_vendor_partition() {
    let app = app();
    register(&app, "wanter", "shared", "pw").await;
    let (_, vendor_body) = register(&app, "vendor", "shared", "pw").await;
    let vendor_id = vendor_body.get("id").and_then(Value::as_str).unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({"username": "shared", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("token").and_then(Value::as_str), Some(vendor_id));
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
async fn test_create_item_for_registered_vendor() {
    let app = app();
    let (_, body) = register(&app, "vendor", "vendor123", "securepassword").await;
    let vendor_id = body.get("id").and_then(Value::as_str).unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "vendor_id": vendor_id,
            "name": "Test yeah",
            "fields": {"field1": "value1"},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("id").and_then(Value::as_str).is_some());
}

#[tokio::test]
async fn test_create_item_rejects_bad_vendor_references() {
    let app = app();
    register(&app, "vendor", "vendor123", "securepassword").await;

    let vendor_ids = [
        // Well-formed but unknown.
        json!("00000000-0000-4000-8000-000000000000"),
        // Another store's id format: malformed here, same failure.
        json!("60a7e0b5f1b2c3d4e5f6a7b8"),
        json!("not-an-id"),
        Value::Null,
    ];
    for vendor_id in vendor_ids {
        let (status, body) = send(
            &app,
            "POST",
            "/items",
            Some(json!({"vendor_id": vendor_id, "name": "Test yeah"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("invalid or missing vendor_id")
        );
    }
}

#[tokio::test]
async fn test_create_item_requires_name() {
    let app = app();
    let (_, body) = register(&app, "vendor", "vendor123", "securepassword").await;
    let vendor_id = body.get("id").and_then(Value::as_str).unwrap();

    for payload in [
        json!({"vendor_id": vendor_id}),
        json!({"vendor_id": vendor_id, "name": ""}),
    ] {
        let (status, body) = send(&app, "POST", "/items", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("item name is required")
        );
    }
}

#[tokio::test]
async fn test_create_item_tolerates_malformed_fields() {
    let app = app();
    let (_, body) = register(&app, "vendor", "vendor123", "securepassword").await;
    let vendor_id = body.get("id").and_then(Value::as_str).unwrap();

    // A non-object payload collapses to the empty mapping.
    let (status, _) = send(
        &app,
        "POST",
        "/items",
        Some(json!({"vendor_id": vendor_id, "name": "Test yeah", "fields": "junk"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// Probes and stubs
// ============================================================================

#[tokio::test]
async fn test_health_reports_store_liveness() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(Value::as_str), Some("success"));
}

#[tokio::test]
async fn test_time_returns_epoch_seconds() {
    let (status, body) = send(&app(), "GET", "/time", None).await;
    assert_eq!(status, StatusCode::OK);

    let time = body.get("time").and_then(Value::as_f64).unwrap();
    // Sanity: after 2020-01-01, not a counter from process start.
    assert!(time > 1_577_836_800.0);
}

#[tokio::test]
async fn test_unimplemented_surface_answers_501() {
    let app = app();
    let id = RecordId::generate().to_string();

    let routes = [
        ("GET", "/items".to_owned()),
        ("PUT", format!("/items/{id}")),
        ("DELETE", format!("/items/{id}")),
        ("GET", format!("/identities/{id}")),
        ("PUT", format!("/identities/{id}")),
        ("DELETE", format!("/identities/{id}")),
    ];
    for (method, path) in routes {
        let (status, body) = send(&app, method, &path, None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{method} {path}");
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("not implemented")
        );
    }
}

// ============================================================================
// Self-test endpoint
// ============================================================================

#[tokio::test]
async fn test_selftest_passes_on_fresh_store() {
    let (status, body) = send(&app(), "GET", "/selftest", None).await;
    assert_eq!(status, StatusCode::OK);

    let report = body.as_object().unwrap();
    assert_eq!(report.len(), 4);
    for scenario in [
        "test_item_insertion_invalid",
        "test_user_registration",
        "test_user_login",
        "test_item_insertion_valid_vendor",
    ] {
        assert_eq!(
            report.get(scenario).and_then(Value::as_str),
            Some("Passed"),
            "scenario {scenario}"
        );
    }
}
