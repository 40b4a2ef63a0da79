//! Error types.
//!
//! Two families live here and they never mix:
//!
//! - [`ApiError`] is what a handler returns when a request cannot be served.
//!   It converts into a JSON `{"detail": ...}` response with a fixed status.
//! - [`Error`] surfaces infrastructure failures: binding to a port, accepting
//!   a connection, or loading configuration.

use http::StatusCode;
use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::schema::ValidationError;

/// The error type returned by the server and configuration layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address `{0}`")]
    Address(String),
}

/// Request-level failure, reported as the HTTP response for that request.
///
/// Every variant is terminal: nothing is retried and nothing falls back to a
/// default value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A path, query or body value violated its declared schema.
    #[error("{0}")]
    BadRequest(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)    => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_)      => StatusCode::NOT_FOUND,
            Self::Conflict(_)      => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_)      => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        Response::builder()
            .status(self.status())
            .json(body.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Location;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let invalid = ValidationError::new(Location::Query, "limit", "Input should be a valid integer");
        assert_eq!(ApiError::from(invalid).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn renders_detail_body() {
        let response = ApiError::not_found("Item with ID 99 not found.").into_response();
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, serde_json::json!({ "detail": "Item with ID 99 not found." }));
    }
}
