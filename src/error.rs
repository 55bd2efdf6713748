//! Error types for the blog core
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Widget Error Enum ==
/// Failures of the comment widget lifecycle.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Anchor element or widget script never became available
    #[error("Widget anchor '{anchor}' or script not found after {attempts} attempts")]
    TargetNotFound { anchor: String, attempts: u32 },

    /// External constructor rejected the options
    #[error("Widget construction failed: {0}")]
    Construction(String),

    /// External teardown failed; only ever logged
    #[error("Widget teardown failed: {0}")]
    Teardown(String),

    /// A newer init invalidated this call
    #[error("Widget initialization superseded by a newer request")]
    Superseded,
}

// == Fetch Error Enum ==
/// Failures of outbound data fetches.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),
}

// == Api Error Enum ==
/// Errors surfaced by the HTTP endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Required query parameter missing or empty
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    /// Upstream lookup failed
    #[error("{0}")]
    Upstream(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP endpoints.
pub type Result<T> = std::result::Result<T, ApiError>;
