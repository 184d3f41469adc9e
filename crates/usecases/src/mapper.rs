//! Entity to DTO conversion.

use motorpool_core::vehicle::VehicleDto;
use motorpool_db::models::vehicle::VehicleEntity;

/// Field-for-field projection of a stored vehicle.
pub fn to_dto(entity: &VehicleEntity) -> VehicleDto {
    VehicleDto {
        id: entity.id,
        name: entity.name.clone(),
        make: entity.make.clone(),
    }
}
