//! # wares
//!
//! An in-memory product-catalog HTTP API built around a staged request
//! pipeline.
//!
//! Every request flows through the same order of concerns:
//!
//! ```text
//! logger → route lookup → [auth] → [validation] → handler → response
//!                             └────── first Err ──────┴→ responder (JSON envelope)
//! ```
//!
//! The stages in brackets run only on the routes that register them. Any
//! stage or handler that fails returns one of the typed [`Error`] variants,
//! and the responder renders them all through one envelope shape:
//! `{"status": "fail" | "error", "message": …}`.
//!
//! The store is a process-local collection (nothing persists across
//! restarts) with monotonic identifiers that are never reused, serialized
//! writes, and snapshot reads. The read side (category filter, pagination,
//! name search, category statistics) is a set of pure functions in
//! [`query`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wares::{Config, ProductStore, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("WARES_API_KEY must be set");
//!     let store = Arc::new(ProductStore::new());
//!     let app = wares::router(&config);
//!
//!     Server::bind(&config.bind_addr)
//!         .serve(app, store)
//!         .await
//!         .expect("server error");
//! }
//! ```

mod config;
mod error;
mod handler;
mod handlers;
mod product;
mod request;
mod response;
mod router;
mod server;
mod store;

pub mod middleware;
pub mod query;

pub use config::{Config, ConfigError};
pub use error::{Error, ServeError};
pub use handler::Handler;
pub use handlers::{WELCOME, router};
pub use product::{Product, ProductDraft, ProductPatch};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use store::ProductStore;
