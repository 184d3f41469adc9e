//! Route definitions for the `/vehicles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vehicles;
use crate::state::AppState;

/// Routes mounted at `/vehicles`.
///
/// ```text
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(vehicles::create))
        .route("/{id}", get(vehicles::get_by_id))
}
