//! Router behaviour when a collaborator stops answering.
//!
//! The webhook cases wire the production notifier (`build_vehicle_notifier`)
//! against a local endpoint that accepts connections but never replies.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, StatusCode};
use common::{body_json, build_app_with, get, post_json, test_config, MemoryRepo};
use motorpool_api::config::ServerConfig;
use motorpool_api::error::PROBLEM_JSON;
use motorpool_api::notifications::build_vehicle_notifier;
use motorpool_events::EventBus;
use motorpool_usecases::NotificationPolicy;
use tokio::net::TcpListener;

/// Accept connections and hold them open without ever writing a response.
async fn spawn_silent_webhook() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{addr}/hook")
}

fn webhook_config(url: &str, extra: &[(&str, &str)]) -> ServerConfig {
    let mut vars = vec![
        ("DATABASE_URL".to_string(), "postgres://localhost/motorpool_test".to_string()),
        ("NOTIFY_WEBHOOK_URL".to_string(), url.to_string()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    ServerConfig::from_lookup(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

#[tokio::test]
async fn test_best_effort_create_answers_while_webhook_hangs() {
    let url = spawn_silent_webhook().await;
    let config = webhook_config(&url, &[]);
    assert_eq!(config.notification_policy, NotificationPolicy::BestEffort);
    assert_eq!(config.request_timeout_secs, 30);

    let bus = Arc::new(EventBus::default());
    let notifier = build_vehicle_notifier(&config, &bus).unwrap();
    let repo = Arc::new(MemoryRepo::default());
    let app = build_app_with(repo.clone(), notifier, config);

    let started = Instant::now();
    let response = post_json(
        app,
        "/api/vehicles",
        serde_json::json!({"name": "vehicle1", "make": "opel"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() < Duration::from_secs(5));
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"id": 1, "name": "vehicle1", "make": "opel"})
    );
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_required_create_reports_delivery_problem_when_webhook_hangs() {
    let url = spawn_silent_webhook().await;
    let config = webhook_config(
        &url,
        &[("NOTIFICATION_POLICY", "required"), ("NOTIFY_TIMEOUT_SECS", "1")],
    );

    let bus = Arc::new(EventBus::default());
    let notifier = build_vehicle_notifier(&config, &bus).unwrap();
    let repo = Arc::new(MemoryRepo::default());
    let app = build_app_with(repo.clone(), notifier, config);

    let started = Instant::now();
    let response = post_json(
        app,
        "/api/vehicles",
        serde_json::json!({"name": "vehicle1", "make": "opel"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(started.elapsed() < Duration::from_secs(5));
    let json = body_json(response).await;
    assert_eq!(json["code"], "DELIVERY_ERROR");
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_request_timeout_is_a_problem_response() {
    let mut config = test_config(NotificationPolicy::BestEffort);
    config.request_timeout_secs = 1;
    let app = build_app_with(
        Arc::new(MemoryRepo::stalled_reads()),
        Arc::new(common::RecordingNotifier::default()),
        config,
    );

    let response = get(app, "/api/vehicles/1").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some(PROBLEM_JSON)
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], "TIMEOUT");
    assert_eq!(json["status"], 503);
}
