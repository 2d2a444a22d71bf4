//! Radix-tree router and pipeline composer.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. Each
//! route is an ordered stage chain ending in a handler; [`Router::dispatch`]
//! is the single place where a raised error becomes a response, so every
//! failure (unknown path, failed stage, handler error) renders through the
//! same envelope.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{BoxedStage, logger};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

struct Route {
    stages: Vec<BoxedStage>,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup; registrations chain. Path parameters use
/// `{name}` syntax and are read with `req.param("name")`.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Route>>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler with no route-level stages.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path, Vec::new(), handler)
    }

    /// Register a handler behind an ordered stage chain. Stages run in the
    /// given order; the first error short-circuits past the handler.
    pub fn on_with(
        self,
        method: Method,
        path: &str,
        stages: impl IntoIterator<Item = BoxedStage>,
        handler: impl Handler,
    ) -> Self {
        self.add(method, path, stages.into_iter().collect(), handler)
    }

    fn add(
        mut self,
        method: Method,
        path: &str,
        stages: Vec<BoxedStage>,
        handler: impl Handler,
    ) -> Self {
        let route = Arc::new(Route {
            stages,
            handler: handler.into_boxed_handler(),
        });
        self.routes
            .entry(method)
            .or_default()
            .insert(path, route)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Runs the full pipeline for one request: log, route, stages in order,
    /// handler, or the responder for whichever step raised first.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        logger::log_request(req.method(), req.path());

        let Some((route, params)) = self.lookup(req.method(), req.path()) else {
            return Error::not_found("Resource not found").into_response();
        };
        req.set_params(params);

        for stage in &route.stages {
            if let Err(error) = stage.apply(&req) {
                return error.into_response();
            }
        }

        match route.handler.call(req).await {
            Ok(response) => response,
            Err(error) => error.into_response(),
        }
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(Arc<Route>, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let route = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((route, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::*;
    use crate::middleware::Stage;
    use crate::store::ProductStore;

    struct Reject;

    impl Stage for Reject {
        fn apply(&self, _req: &Request) -> Result<(), Error> {
            Err(Error::unauthorized("Unauthorized access"))
        }
    }

    fn request(method: Method, target: &str) -> Request {
        Request::new(
            method,
            target,
            HeaderMap::new(),
            Bytes::new(),
            Arc::new(ProductStore::new()),
        )
    }

    #[tokio::test]
    async fn unknown_path_renders_the_envelope() {
        let router = Router::new();
        let response = router.dispatch(request(Method::GET, "/nope")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn failing_stage_short_circuits_the_handler() {
        let hit = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&hit);
        let handler = move |_req: Request| {
            let seen = Arc::clone(&seen);
            async move {
                seen.store(true, Ordering::SeqCst);
                Ok::<_, Error>(Response::status(StatusCode::OK))
            }
        };
        let stage: BoxedStage = Arc::new(Reject);
        let router = Router::new().on_with(Method::POST, "/guarded", [stage], handler);

        let response = router.dispatch(request(Method::POST, "/guarded")).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst), "handler ran past a failed stage");
    }

    #[tokio::test]
    async fn path_params_reach_the_handler() {
        async fn echo_id(req: Request) -> Result<Response, Error> {
            Ok(Response::text(req.param("id").unwrap_or("missing").to_owned()))
        }
        let router = Router::new().on(Method::GET, "/items/{id}", echo_id);

        let response = router.dispatch(request(Method::GET, "/items/42")).await;
        assert_eq!(response.body(), b"42");
    }

    #[tokio::test]
    async fn handler_error_renders_through_the_responder() {
        async fn fail(_req: Request) -> Result<Response, Error> {
            Err(Error::internal("simulated"))
        }
        let router = Router::new().on(Method::GET, "/boom", fail);

        let response = router.dispatch(request(Method::GET, "/boom")).await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Internal Server Error");
    }
}
