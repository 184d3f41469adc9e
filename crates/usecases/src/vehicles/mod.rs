//! Vehicle use cases.

use std::sync::Arc;
use std::time::Duration;

use motorpool_core::vehicle::VehicleDto;
use motorpool_db::repositories::VehicleRepository;
use motorpool_events::EventNotifier;

use crate::policy::NotificationPolicy;

pub mod add_vehicle;
pub mod get_vehicle;

pub use add_vehicle::AddVehicle;
pub use get_vehicle::GetVehicle;

/// Every vehicle use case, wired to the same collaborators.
pub struct VehiclesUseCases {
    pub add_vehicle: AddVehicle,
    pub get_vehicle: GetVehicle,
}

impl VehiclesUseCases {
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        notifier: Arc<dyn EventNotifier<VehicleDto>>,
        policy: NotificationPolicy,
    ) -> Self {
        Self {
            add_vehicle: AddVehicle::new(Arc::clone(&repository), notifier, policy),
            get_vehicle: GetVehicle::new(repository),
        }
    }

    /// Bound how long a create request waits for a required notification.
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.add_vehicle = self.add_vehicle.with_delivery_timeout(timeout);
        self
    }
}
