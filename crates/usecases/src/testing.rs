//! In-memory collaborators for use-case tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use motorpool_core::error::CoreError;
use motorpool_core::types::DbId;
use motorpool_core::vehicle::{CreateVehicleRequest, VehicleDto};
use motorpool_db::models::vehicle::VehicleEntity;
use motorpool_db::repositories::VehicleRepository;
use motorpool_events::{DeliveryError, EventNotifier};

/// Repository that assigns sequential ids, or fails every call with `fail_with`.
#[derive(Default)]
pub struct FakeRepo {
    rows: Mutex<Vec<VehicleEntity>>,
    pub fail_with: Option<CoreError>,
    pub create_calls: Mutex<Vec<CreateVehicleRequest>>,
}

impl FakeRepo {
    pub fn failing(err: CoreError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    pub fn with_rows(rows: Vec<VehicleEntity>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VehicleRepository for FakeRepo {
    async fn create(&self, input: &CreateVehicleRequest) -> Result<VehicleEntity, CoreError> {
        self.create_calls.lock().unwrap().push(input.clone());
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
}

/// Notifier that records every payload, optionally failing or never
/// finishing each call.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<VehicleDto>>,
    pub fail_status: Option<u16>,
    pub stall: bool,
}

impl RecordingNotifier {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Default::default()
        }
    }

    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<VehicleDto> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait until at least `count` payloads were recorded by background
    /// deliveries, then return them.
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
        if self.stall {
            std::future::pending::<()>().await;
        }
        match self.fail_status {
            Some(status) => Err(DeliveryError::HttpStatus(status)),
            None => Ok(()),
        }
    }
}
