pub mod health;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vehicles                  create (POST)
/// /vehicles/{id}             get (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/vehicles", vehicles::router())
}
