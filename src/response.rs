//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it; the server converts it into
//! the hyper body type at the edge. Error responses never come through here
//! directly; they are rendered by the responder in [`crate::error`].

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use http::StatusCode;
/// use wares::Response;
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use http::StatusCode;
/// use wares::Response;
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/api/products/42")
///     .json(br#"{"id":42}"#.to_vec());
/// ```
pub struct Response {
    body: Vec<u8>,
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl Response {
    /// `200 OK` with an `application/json` body. Pass bytes from the
    /// serializer directly, no intermediate allocation.
    pub fn json(body: Vec<u8>) -> Self {
        Self::with_content_type("application/json", body)
    }

    /// `200 OK` with a `text/plain; charset=utf-8` body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self {
            body: Vec::new(),
            headers: Vec::new(),
            status: code,
        }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder {
            headers: Vec::new(),
            status: StatusCode::OK,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive response-header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn with_content_type(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: StatusCode::OK,
        }
    }

    /// Converts into the hyper response type at the server edge.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let Self {
            body,
            headers,
            status,
        } = self;
        let mut builder = http::Response::builder().status(status);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(Full::new(Bytes::from(body)))
            .unwrap_or_else(|_| {
                // Only reachable if this crate produced a malformed header
                // name or value. Answer 500 rather than dropping the
                // connection.
                let mut fallback = http::Response::new(Full::new(Bytes::new()));
                *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`]. Defaults to `200 OK`; terminated by a
/// typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", body)
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with no body (e.g. `204 No Content`).
    pub fn no_body(self) -> Response {
        Response {
            body: Vec::new(),
            headers: self.headers,
            status: self.status,
        }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response {
            body,
            headers,
            status: self.status,
        }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`]. Handlers return
/// `Result<impl IntoResponse, Error>`; the `Ok` side converts through this
/// trait, the `Err` side through the responder.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Return a bare status from a handler: `Ok(StatusCode::NO_CONTENT)`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_set_content_type() {
        let response = Response::json(b"{}".to_vec());
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.header("Content-Type"), Some("application/json"));

        let response = Response::text("hi");
        assert_eq!(
            response.header("content-type"),
            Some("text/plain; charset=utf-8")
        );
    }

    #[test]
    fn builder_applies_status_and_headers() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/api/products/1")
            .json(b"{}".to_vec());
        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.header("location"), Some("/api/products/1"));
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn into_http_carries_everything_over() {
        let http_response = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/x")
            .json(b"{}".to_vec())
            .into_http();
        assert_eq!(http_response.status(), StatusCode::CREATED);
        assert_eq!(http_response.headers()["location"], "/x");
        assert_eq!(http_response.headers()["content-type"], "application/json");
    }
}
