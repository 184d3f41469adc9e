use crate::types::DbId;

/// Failure kinds surfaced by use cases and their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The persistence collaborator failed (connectivity, constraint violation, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// The notification collaborator could not publish an event.
    #[error("Delivery error: {0}")]
    Delivery(String),
}
