//! Duplicate-suppression behavior across the full pipeline.

use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use campus_client::ApiClient;

mod common;

/// Counting POST route at /api/contact.
fn contact_app(hits: Arc<AtomicU32>) -> Router {
    Router::new().route(
        "/api/contact",
        post(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "status": "ok" }))
            }
        }),
    )
}

#[tokio::test]
async fn test_concurrent_duplicate_posts_transmit_once() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = common::start_mock_backend(contact_app(hits.clone())).await;
    let client = ApiClient::new(&common::backend_config(addr)).unwrap();

    let body = json!({ "subject": "hello", "message": "first" });
    let (first, second) = tokio::join!(
        client.post("/api/contact", &body),
        client.post("/api/contact", &body)
    );

    let (settled, suppressed) = match (first, second) {
        (Ok(r), Err(e)) => (r, e),
        (Err(e), Ok(r)) => (r, e),
        other => panic!("expected one transmission and one suppression: {:?}", other),
    };
    assert_eq!(settled.status(), StatusCode::OK);
    assert!(suppressed.is_suppressed());
    assert_eq!(
        hits.load(Ordering::SeqCst),
        1,
        "only one request should reach the backend"
    );
}

#[tokio::test]
async fn test_concurrent_duplicate_gets_transmit_once() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/api/grades",
        get(move || {
            let h = h.clone();
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "grades": [] }))
            }
        }),
    );
    let addr = common::start_mock_backend(app).await;
    let client = ApiClient::new(&common::backend_config(addr)).unwrap();

    let (first, second) = tokio::join!(client.get("/api/grades"), client.get("/api/grades"));

    assert_eq!(
        [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_settled_fingerprint_frees_immediately() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = common::start_mock_backend(contact_app(hits.clone())).await;

    let mut config = common::backend_config(addr);
    // Grace long enough that only settlement can explain the second send.
    config.dedup.grace_window_ms = 10_000;
    let client = ApiClient::new(&config).unwrap();

    let body = json!({ "subject": "hello", "message": "again" });
    client.post("/api/contact", &body).await.unwrap();
    let second = client.post("/api/contact", &body).await.unwrap();

    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        hits.load(Ordering::SeqCst),
        2,
        "a settled request must not block its repeat"
    );
}

#[tokio::test]
async fn test_pending_request_past_grace_window_admits_repeat() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/api/contact",
        post(move || {
            let h = h.clone();
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(1)).await;
                Json(json!({ "status": "ok" }))
            }
        }),
    );
    let addr = common::start_mock_backend(app).await;

    let mut config = common::backend_config(addr);
    config.dedup.grace_window_ms = 100;
    let client = ApiClient::new(&config).unwrap();

    let body = json!({ "subject": "slow", "message": "backend" });
    let c = client.clone();
    let b = body.clone();
    let first = tokio::spawn(async move { c.post("/api/contact", &b).await });

    // Well past the grace window; the first request is still pending.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = client.post("/api/contact", &body).await.unwrap();

    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    first.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_distinct_bodies_are_not_duplicates() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = common::start_mock_backend(contact_app(hits.clone())).await;
    let client = ApiClient::new(&common::backend_config(addr)).unwrap();

    let body_a = json!({ "subject": "a" });
    let body_b = json!({ "subject": "b" });
    let (first, second) = tokio::join!(
        client.post("/api/contact", &body_a),
        client.post("/api/contact", &body_b)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_patch_is_outside_the_allow_list() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/api/profile",
        patch(move || {
            let h = h.clone();
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "status": "ok" }))
            }
        }),
    );
    let addr = common::start_mock_backend(app).await;
    let client = ApiClient::new(&common::backend_config(addr)).unwrap();

    let body = json!({ "display_name": "new" });
    let (first, second) = tokio::join!(
        client.patch("/api/profile", &body),
        client.patch("/api/profile", &body)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(
        hits.load(Ordering::SeqCst),
        2,
        "PATCH must never be suppressed"
    );
}

#[tokio::test]
async fn test_transport_failure_frees_the_fingerprint() {
    let addr = common::unreachable_addr();
    let client = ApiClient::new(&common::backend_config(addr)).unwrap();

    let body = json!({ "subject": "nobody", "message": "home" });
    let first = client.post("/api/contact", &body).await.err().unwrap();
    let second = client.post("/api/contact", &body).await.err().unwrap();

    assert!(!first.is_suppressed());
    assert!(
        !second.is_suppressed(),
        "a failed request settles and must not block its repeat"
    );
}

#[tokio::test]
async fn test_disabled_dedup_transmits_everything() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = common::start_mock_backend(contact_app(hits.clone())).await;

    let mut config = common::backend_config(addr);
    config.dedup.enabled = false;
    let client = ApiClient::new(&config).unwrap();

    let body = json!({ "subject": "hello", "message": "twice" });
    let (first, second) = tokio::join!(
        client.post("/api/contact", &body),
        client.post("/api/contact", &body)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
