//! Handlers for the `/vehicles` resource.
//!
//! Each handler forwards to one use case; the `AppError` conversion turns a
//! failed result into a problem-details response.

use axum::extract::State;
use axum::Json;
use motorpool_core::vehicle::{CreateVehicleRequest, VehicleDto};

use crate::error::AppResult;
use crate::extract::{JsonBody, PathId};
use crate::state::AppState;

/// GET /api/vehicles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<VehicleDto>> {
    let vehicle = state.vehicles.get_vehicle.execute(id).await?;
    Ok(Json(vehicle))
}

/// POST /api/vehicles
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateVehicleRequest>,
) -> AppResult<Json<VehicleDto>> {
    let vehicle = state.vehicles.add_vehicle.execute(&input).await?;
    Ok(Json(vehicle))
}
