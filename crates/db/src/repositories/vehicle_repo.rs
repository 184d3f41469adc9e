//! Repository for the `vehicles` table.

use async_trait::async_trait;
use motorpool_core::error::CoreError;
use motorpool_core::types::DbId;
use motorpool_core::vehicle::CreateVehicleRequest;

use crate::models::vehicle::VehicleEntity;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, make";

/// Storage contract the vehicle use cases depend on.
///
/// Implementations report a missing row as [`CoreError::NotFound`] and any
/// infrastructure failure as [`CoreError::Storage`].
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a new vehicle, returning the stored row with its assigned id.
    async fn create(&self, input: &CreateVehicleRequest) -> Result<VehicleEntity, CoreError>;

    /// Look up a vehicle by id.
    async fn get_by_id(&self, id: DbId) -> Result<VehicleEntity, CoreError>;

    /// Whether the backing store is reachable.
    async fn is_healthy(&self) -> bool {
        true
    }
}

/// sqlx-backed [`VehicleRepository`].
#[derive(Clone)]
pub struct VehicleRepo {
    pool: DbPool,
}

impl VehicleRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for VehicleRepo {
    async fn create(&self, input: &CreateVehicleRequest) -> Result<VehicleEntity, CoreError> {
        let query = format!(
            "INSERT INTO vehicles (name, make)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let vehicle = sqlx::query_as::<_, VehicleEntity>(&query)
            .bind(&input.name)
            .bind(&input.make)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        tracing::debug!(vehicle_id = vehicle.id, "Inserted vehicle row");
        Ok(vehicle)
    }

    async fn get_by_id(&self, id: DbId) -> Result<VehicleEntity, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, VehicleEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or(CoreError::NotFound {
                entity: "Vehicle",
                id,
            })
    }

    async fn is_healthy(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}

/// Map a driver error to [`CoreError::Storage`].
///
/// The full error is logged here; callers only see the sqlx summary.
fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Vehicle storage operation failed");
    match &err {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some(constraint) => CoreError::Storage(format!("constraint violated: {constraint}")),
            None => CoreError::Storage("database rejected the statement".to_string()),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            CoreError::Storage("database unavailable".to_string())
        }
        _ => CoreError::Storage("database operation failed".to_string()),
    }
}
