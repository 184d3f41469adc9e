use std::sync::Arc;

use motorpool_core::error::CoreError;
use motorpool_core::types::DbId;
use motorpool_core::vehicle::VehicleDto;
use motorpool_db::repositories::VehicleRepository;

use crate::mapper::to_dto;

/// Fetch one vehicle by id.
pub struct GetVehicle {
    repository: Arc<dyn VehicleRepository>,
}

impl GetVehicle {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: DbId) -> Result<VehicleDto, CoreError> {
        let entity = self.repository.get_by_id(id).await?;
        Ok(to_dto(&entity))
    }
}
