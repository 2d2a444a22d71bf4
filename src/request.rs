//! Incoming HTTP request type.
//!
//! Built once per request from the hyper parts plus the collected body, then
//! handed through the stage chain to the handler. Carries the shared store
//! handle so handlers stay plain `async fn`s.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::store::ProductStore;

pub struct Request {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    store: Arc<ProductStore>,
}

impl Request {
    /// Builds a request from its raw pieces. `target` is the request target
    /// as it appears on the wire: the path plus an optional `?query`.
    pub fn new(
        method: Method,
        target: &str,
        headers: HeaderMap,
        body: Bytes,
        store: Arc<ProductStore>,
    ) -> Self {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        Self {
            method,
            path: path.to_owned(),
            query: parse_query(raw_query),
            headers,
            body,
            params: HashMap::new(),
            store,
        }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Case-insensitive header lookup; non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns a decoded query parameter value.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/products/{id}`, `req.param("id")` on
    /// `/api/products/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a path parameter as a product id. A non-numeric segment is a
    /// validation error; a missing parameter means the route table and the
    /// handler disagree, which is ours to answer for, not the client's.
    pub fn param_id(&self, key: &str) -> Result<u64, Error> {
        let raw = self
            .param(key)
            .ok_or_else(|| Error::internal(format!("route has no `{key}` parameter")))?;
        raw.parse()
            .map_err(|_| Error::validation("Product id must be a number"))
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::validation(format!("invalid JSON body: {e}")))
    }
}

// ── Query-string parsing ──────────────────────────────────────────────────────

fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut query = HashMap::new();
    let Some(raw) = raw else { return query };
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        query.insert(percent_decode(key), percent_decode(value));
    }
    query
}

/// Minimal application/x-www-form-urlencoded decoding: `+` becomes a space,
/// `%XX` becomes the byte. Malformed escapes pass through literally.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match raw.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok()) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(target: &str) -> Request {
        Request::new(
            Method::GET,
            target,
            HeaderMap::new(),
            Bytes::new(),
            Arc::new(ProductStore::new()),
        )
    }

    #[test]
    fn splits_path_and_query() {
        let req = request("/api/products?category=kitchen&page=2");
        assert_eq!(req.path(), "/api/products");
        assert_eq!(req.query("category"), Some("kitchen"));
        assert_eq!(req.query("page"), Some("2"));
        assert_eq!(req.query("limit"), None);
    }

    #[test]
    fn decodes_query_values() {
        let req = request("/api/products/search?name=Coffee+Maker");
        assert_eq!(req.query("name"), Some("Coffee Maker"));

        let req = request("/api/products/search?name=Coffee%20Maker&x=100%");
        assert_eq!(req.query("name"), Some("Coffee Maker"));
        assert_eq!(req.query("x"), Some("100%"));
    }

    #[test]
    fn valueless_and_empty_pairs() {
        let req = request("/x?flag&=v&");
        assert_eq!(req.query("flag"), Some(""));
    }

    #[test]
    fn param_id_rejects_non_numeric() {
        let mut req = request("/api/products/abc");
        req.set_params(HashMap::from([("id".to_owned(), "abc".to_owned())]));
        assert!(matches!(req.param_id("id"), Err(Error::Validation(_))));

        req.set_params(HashMap::from([("id".to_owned(), "42".to_owned())]));
        assert_eq!(req.param_id("id").unwrap(), 42);
    }

    #[test]
    fn missing_param_is_internal() {
        let req = request("/api/products/1");
        assert!(matches!(req.param_id("id"), Err(Error::Internal(_))));
    }
}
