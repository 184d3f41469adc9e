use std::sync::Arc;

use motorpool_db::repositories::VehicleRepository;
use motorpool_usecases::VehiclesUseCases;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Vehicle use cases, wired once at startup.
    pub vehicles: Arc<VehiclesUseCases>,
    /// Repository handle, used by the health probe.
    pub repository: Arc<dyn VehicleRepository>,
}
