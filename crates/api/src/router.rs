//! Application router and its middleware stack.
//!
//! [`build_app_router`] is shared by the binary and the integration tests.
//! Failures raised by the middleware itself (request timeout, handler panic)
//! are rendered through [`AppError`] so every error a client sees is a
//! problem-details body.

use std::any::Any;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Status the timeout layer answers with before it is rewritten as a problem.
const TIMEOUT_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;

/// Build the vehicle API [`Router`].
///
/// Layers, innermost first:
///
/// 1. panic recovery, answering with an `internal-error` problem
/// 2. request timeout (`REQUEST_TIMEOUT_SECS`), answering with a `timeout` problem
/// 3. request id propagation to the response
/// 4. request/response tracing
/// 5. request id assignment
/// 6. CORS
///
/// Panics if a configured CORS origin is not a valid header value.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::custom(panic_as_problem))
        .layer(TimeoutLayer::with_status_code(
            TIMEOUT_STATUS,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(middleware::map_response(timeout_as_problem))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the configured origins; the API only serves `GET` and `POST`
/// with JSON bodies.
///
/// Panics if any configured origin is not a valid header value.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Replace the timeout layer's empty response with a problem body. Handler
/// responses always carry a content type, so only the bare one is touched.
async fn timeout_as_problem(response: Response) -> Response {
    if response.status() == TIMEOUT_STATUS && !response.headers().contains_key(CONTENT_TYPE) {
        tracing::warn!("Request exceeded the configured timeout");
        return AppError::Timeout.into_response();
    }
    response
}

fn panic_as_problem(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    tracing::error!(panic = %message, "Handler panicked");
    AppError::Internal.into_response()
}
