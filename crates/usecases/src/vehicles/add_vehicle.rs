use std::sync::Arc;
use std::time::Duration;

use motorpool_core::error::CoreError;
use motorpool_core::validation::validate_input;
use motorpool_core::vehicle::{CreateVehicleRequest, VehicleDto};
use motorpool_db::repositories::VehicleRepository;
use motorpool_events::EventNotifier;

use crate::mapper::to_dto;
use crate::policy::NotificationPolicy;

/// How long a create request waits for a required notification.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Store a new vehicle and announce it.
pub struct AddVehicle {
    repository: Arc<dyn VehicleRepository>,
    notifier: Arc<dyn EventNotifier<VehicleDto>>,
    policy: NotificationPolicy,
    delivery_timeout: Duration,
}

impl AddVehicle {
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        notifier: Arc<dyn EventNotifier<VehicleDto>>,
        policy: NotificationPolicy,
    ) -> Self {
        Self {
            repository,
            notifier,
            policy,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    /// Bound the wait for a notification under [`NotificationPolicy::Required`].
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Validate, persist, map, then notify exactly once.
    ///
    /// Invalid requests never reach the repository. Under
    /// [`NotificationPolicy::BestEffort`] the notification runs on its own
    /// task and the DTO is returned straight away; under
    /// [`NotificationPolicy::Required`] the caller waits for delivery, up to
    /// the configured delivery timeout.
    pub async fn execute(&self, request: &CreateVehicleRequest) -> Result<VehicleDto, CoreError> {
        validate_input(request)?;

        let entity = self.repository.create(request).await?;
        let dto = to_dto(&entity);
        tracing::info!(vehicle_id = dto.id, make = %dto.make, "Vehicle created");

        match self.policy {
            NotificationPolicy::BestEffort => self.notify_in_background(dto.clone()),
            NotificationPolicy::Required => self.notify_within_deadline(&dto).await?,
        }

        Ok(dto)
    }

    fn notify_in_background(&self, dto: VehicleDto) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&dto).await {
                tracing::warn!(
                    vehicle_id = dto.id,
                    error = %e,
                    "Vehicle created but notification was not delivered"
                );
            }
        });
    }

    async fn notify_within_deadline(&self, dto: &VehicleDto) -> Result<(), CoreError> {
        let reason =
            match tokio::time::timeout(self.delivery_timeout, self.notifier.notify(dto)).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!(
                    "notification not delivered within {:?}",
                    self.delivery_timeout
                ),
            };

        tracing::error!(
            vehicle_id = dto.id,
            error = %reason,
            "Vehicle created but required notification failed"
        );
        Err(CoreError::Delivery(reason))
    }
}
