#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use motorpool_api::config::ServerConfig;
use motorpool_api::router::build_app_router;
use motorpool_api::state::AppState;
use motorpool_core::error::CoreError;
use motorpool_core::types::DbId;
use motorpool_core::vehicle::{CreateVehicleRequest, VehicleDto};
use motorpool_db::models::vehicle::VehicleEntity;
use motorpool_db::repositories::VehicleRepository;
use motorpool_events::{DeliveryError, EventNotifier};
use motorpool_usecases::{NotificationPolicy, VehiclesUseCases};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(policy: NotificationPolicy) -> ServerConfig {
    ServerConfig {
        database_url: "postgres://localhost/motorpool_test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        notify_timeout_secs: 10,
        shutdown_timeout_secs: 30,
        notify_webhook_url: None,
        notification_policy: policy,
    }
}

// ---------------------------------------------------------------------------
// Fake collaborators
// ---------------------------------------------------------------------------

/// In-memory repository assigning sequential ids.
#[derive(Default)]
pub struct MemoryRepo {
    rows: Mutex<Vec<VehicleEntity>>,
    fail_with: Option<CoreError>,
    stall_reads: bool,
}

impl MemoryRepo {
    pub fn failing(err: CoreError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    /// A repository whose lookups never complete.
    pub fn stalled_reads() -> Self {
        Self {
            stall_reads: true,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl VehicleRepository for MemoryRepo {
    async fn create(&self, input: &CreateVehicleRequest) -> Result<VehicleEntity, CoreError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut rows = self.rows.lock().unwrap();
        let entity = VehicleEntity {
            id: rows.len() as DbId + 1,
            name: input.name.clone(),
            make: input.make.clone(),
        };
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn get_by_id(&self, id: DbId) -> Result<VehicleEntity, CoreError> {
        if self.stall_reads {
            std::future::pending::<()>().await;
        }
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Vehicle",
                id,
            })
    }

    async fn is_healthy(&self) -> bool {
        self.fail_with.is_none()
    }
}

/// Notifier recording every payload, optionally failing each call.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<VehicleDto>>,
    fail_status: Option<u16>,
}

impl RecordingNotifier {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<VehicleDto> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait until background delivery recorded at least `count` payloads.
    pub async fn wait_for_sent(&self, count: usize) -> Vec<VehicleDto> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let sent = self.sent();
                if sent.len() >= count {
                    return sent;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("notification was not recorded in time")
    }
}

#[async_trait]
impl EventNotifier<VehicleDto> for RecordingNotifier {
    async fn notify(&self, message: &VehicleDto) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.clone());
        match self.fail_status {
            Some(status) => Err(DeliveryError::HttpStatus(status)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router over the given collaborators, using the
/// same middleware stack as production.
pub fn build_test_app(
    repo: Arc<MemoryRepo>,
    notifier: Arc<RecordingNotifier>,
    policy: NotificationPolicy,
) -> Router {
    build_app_with(repo, notifier, test_config(policy))
}

/// Build the application router from an explicit configuration and any
/// vehicle notifier.
pub fn build_app_with(
    repository: Arc<dyn VehicleRepository>,
    notifier: Arc<dyn EventNotifier<VehicleDto>>,
    config: ServerConfig,
) -> Router {
    let vehicles = Arc::new(
        VehiclesUseCases::new(
            Arc::clone(&repository),
            notifier,
            config.notification_policy,
        )
        .with_delivery_timeout(Duration::from_secs(config.notify_timeout_secs)),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        vehicles,
        repository,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
