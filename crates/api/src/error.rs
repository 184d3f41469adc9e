use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use motorpool_core::error::CoreError;
use serde::Serialize;

/// Media type for RFC 7807 problem-details bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Base URI for the `type` member of problem-details bodies.
const PROBLEM_TYPE_BASE: &str = "https://motorpool.dev/problems/";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce RFC 7807 problem-details responses;
/// this is the only place use-case failures become wire responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `motorpool_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request that could not be decoded (malformed JSON, bad path id).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request did not finish within the server's request timeout.
    #[error("Request timed out")]
    Timeout,

    /// A handler panicked; the panic message stays in the logs.
    #[error("Internal server error")]
    Internal,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Problem-details body. `code` is an extension member carrying the
/// machine-readable error kind.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    pub code: &'static str,
}

impl AppError {
    /// Classify the error into status, error code, slug, title and detail.
    fn classify(&self) -> (StatusCode, &'static str, &'static str, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "not-found",
                    "Resource not found",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "validation-error",
                    "Validation failed",
                    msg.clone(),
                ),
                CoreError::Storage(msg) => {
                    tracing::error!(error = %msg, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "storage-error",
                        "Storage failure",
                        "The vehicle store could not complete the request".to_string(),
                    )
                }
                CoreError::Delivery(msg) => {
                    tracing::error!(error = %msg, "Delivery error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "DELIVERY_ERROR",
                        "delivery-error",
                        "Notification delivery failed",
                        "The vehicle was stored but its notification could not be delivered"
                            .to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "bad-request",
                "Bad request",
                msg.clone(),
            ),
            AppError::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "TIMEOUT",
                "timeout",
                "Request timed out",
                "The request did not complete in time".to_string(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal-error",
                "Internal server error",
                "An unexpected error occurred".to_string(),
            ),
        }
    }

    /// Build the problem-details body for this error.
    pub fn problem(&self) -> ProblemDetails {
        let (status, code, slug, title, detail) = self.classify();
        ProblemDetails {
            problem_type: format!("{PROBLEM_TYPE_BASE}{slug}"),
            title,
            status: status.as_u16(),
            detail,
            code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.problem();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, axum::Json(problem)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        response
    }
}
