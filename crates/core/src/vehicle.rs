//! API-facing vehicle shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;
use crate::validation::{not_blank, MAX_FIELD_LENGTH};

/// Transport projection of a stored vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDto {
    pub id: DbId,
    pub name: String,
    pub make: String,
}

/// Body of `POST /api/vehicles`. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(
        length(max = MAX_FIELD_LENGTH, message = "exceeds the maximum length"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(max = MAX_FIELD_LENGTH, message = "exceeds the maximum length"),
        custom(function = "not_blank")
    )]
    pub make: String,
}

impl CreateVehicleRequest {
    pub fn new(name: impl Into<String>, make: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            make: make.into(),
        }
    }
}
