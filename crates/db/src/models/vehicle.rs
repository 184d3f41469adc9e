//! Vehicle row model.

use motorpool_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicles` table.
///
/// `created_at` exists in the table but is storage metadata and is not
/// selected into the entity.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VehicleEntity {
    pub id: DbId,
    pub name: String,
    pub make: String,
}
