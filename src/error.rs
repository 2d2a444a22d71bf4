//! Error taxonomy and the single responder that renders it.
//!
//! Every pipeline stage and handler reports failure by returning one of the
//! [`Error`] variants. The dispatcher converts the first error it sees into
//! the uniform JSON envelope:
//!
//! ```json
//! {"status": "fail", "message": "Product not found"}
//! ```
//!
//! `status` is `"fail"` for 4xx-class errors and `"error"` for 5xx-class.
//! Internal errors never leak their detail into the response body: the
//! detail goes to the process log, the client gets a generic message.

use http::StatusCode;
use thiserror::Error as ThisError;
use tracing::error;

use crate::response::{IntoResponse, Response};

/// The closed set of failures a request can produce.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Requested id or resource absent. Renders as 404.
    #[error("{0}")]
    NotFound(String),
    /// Malformed or missing required input. Renders as 400.
    #[error("{0}")]
    Validation(String),
    /// Failed credential check. Renders as 401.
    #[error("{0}")]
    Unauthorized(String),
    /// Any unclassified failure. Renders as 500 with a generic message;
    /// the carried detail is logged, never sent to the client.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The responder: one place turns every error into the envelope shape.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!(%detail, "unclassified failure");
                "Internal Server Error".to_owned()
            }
            other => other.to_string(),
        };
        let envelope = serde_json::json!({
            "status": if status.is_server_error() { "error" } else { "fail" },
            "message": message,
        });
        Response::builder()
            .status(status)
            .json(envelope.to_string().into_bytes())
    }
}

// ── Infrastructure errors ─────────────────────────────────────────────────────

/// Socket-level failure of the server itself: binding a port, accepting a
/// connection. Application failures are [`Error`] values, never this type.
#[derive(Debug, ThisError)]
#[error("io: {0}")]
pub struct ServeError(#[from] std::io::Error);

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(err: Error) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status_code();
        let body = serde_json::from_slice(response.body()).unwrap();
        (status, body)
    }

    #[test]
    fn client_errors_render_fail() {
        let (status, body) = envelope(Error::not_found("Product not found"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Product not found");

        let (status, body) = envelope(Error::unauthorized("Unauthorized access"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Unauthorized access");

        let (status, _) = envelope(Error::validation("bad input"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_render_error_and_hide_detail() {
        let (status, body) = envelope(Error::internal("lock poisoned at store.rs:42"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Internal Server Error");
    }
}
