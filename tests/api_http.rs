// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/panel, /api/weather, /api/news, /api/calendar before and after refreshes
// - GET/PUT /api/settings (persistence + refresh trigger)

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Local, Utc};
use serde_json::{json, Value as Json};
use tokio::sync::watch;
use tower::ServiceExt as _; // for `oneshot`

use info_display::api::{self, AppState};
use info_display::error::{AttemptError, FetchExhausted, StrategyFailure};
use info_display::news::{FeedItem, Retrieved};
use info_display::panel::{self, SharedPanel};
use info_display::settings::{MemorySettings, SettingsStore};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct Harness {
    app: Router,
    panel: SharedPanel,
    refresh_rx: watch::Receiver<u64>,
}

fn harness() -> Harness {
    let shared = panel::shared();
    let settings: Arc<dyn SettingsStore> = Arc::new(MemorySettings::new("130000", "main"));
    let (tx, rx) = watch::channel(0u64);
    Harness {
        app: api::router(AppState::new(shared.clone(), settings, tx)),
        panel: shared,
        refresh_rx: rx,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Json>) -> (StatusCode, Json) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let resp = app.clone().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, json)
}

#[tokio::test]
async fn health_returns_ok() {
    let h = harness();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = h.app.clone().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn sections_are_pending_before_first_refresh() {
    let h = harness();
    let (status, body) = send(&h.app, "GET", "/api/panel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["status"], "pending");
    assert_eq!(body["news"]["status"], "pending");
    assert_eq!(body["calendar"]["grid"], Json::Null);
}

#[tokio::test]
async fn calendar_endpoint_reflects_refresh() {
    let h = harness();
    panel::write(&h.panel).apply_calendar(&Local::now());

    let (status, body) = send(&h.app, "GET", "/api/calendar", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["grid"]["rows"].as_array().expect("rows");
    assert!((4..=6).contains(&rows.len()));
    let today_cells = rows
        .iter()
        .flat_map(|r| r.as_array().unwrap())
        .filter(|c| c["is_today"] == true)
        .count();
    assert_eq!(today_cells, 1);
    assert!(body["today"]["clock"].as_str().unwrap().contains(':'));
}

#[tokio::test]
async fn news_endpoint_keeps_headlines_after_exhaustion() {
    let h = harness();
    let item = FeedItem::new("headline").with_published(Utc::now().to_rfc2822());
    {
        let mut st = panel::write(&h.panel);
        st.apply_news(
            "main",
            Ok(Retrieved {
                strategy: "allorigins".into(),
                items: vec![item],
            }),
            Utc::now(),
        );
    }

    let (_, body) = send(&h.app, "GET", "/api/news", None).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["strategy"], "allorigins");
    assert_eq!(body["label"], "Top Stories");
    assert_eq!(body["items"][0]["number"], 1);
    assert_eq!(body["items"][0]["relative"], "just now");

    panel::write(&h.panel).apply_news(
        "main",
        Err(FetchExhausted {
            attempts: vec![StrategyFailure {
                strategy: "direct".into(),
                error: AttemptError::Status(502),
            }],
        }),
        Utc::now(),
    );

    let (_, body) = send(&h.app, "GET", "/api/news", None).await;
    assert_eq!(body["status"], "exhausted");
    assert_eq!(body["items"][0]["title"], "headline");
    assert_eq!(body["attempts"], json!(["direct: non-success HTTP status 502"]));
}

#[tokio::test]
async fn settings_roundtrip_triggers_refresh() {
    let mut h = harness();

    let (_, body) = send(&h.app, "GET", "/api/settings", None).await;
    assert_eq!(body, json!({ "weatherRegion": "130000", "newsCategory": "main" }));

    let (status, body) = send(
        &h.app,
        "PUT",
        "/api/settings",
        Some(json!({ "weatherRegion": "270000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "weatherRegion": "270000", "newsCategory": "main" }));
    assert!(h.refresh_rx.has_changed().unwrap(), "change bumps the trigger");
    let _ = h.refresh_rx.borrow_and_update();

    // Same value again: nothing changes, no refresh.
    send(
        &h.app,
        "PUT",
        "/api/settings",
        Some(json!({ "weatherRegion": "270000", "newsCategory": "  " })),
    )
    .await;
    assert!(!h.refresh_rx.has_changed().unwrap());
}

#[tokio::test]
async fn malformed_settings_body_is_rejected() {
    let h = harness();
    let (status, _) = send(
        &h.app,
        "PUT",
        "/api/settings",
        Some(json!({ "weatherRegion": 270000 })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _) = send(&h.app, "PUT", "/api/settings", Some(json!({ "theme": "dark" }))).await;
    assert!(status.is_client_error(), "unknown keys are rejected");

    let (_, body) = send(&h.app, "GET", "/api/settings", None).await;
    assert_eq!(body["weatherRegion"], "130000");
}
