//! Request pipeline stages.
//!
//! A [`Stage`] runs before a route's handler and either forwards the request
//! or short-circuits it with a typed error. Stage order is fixed per route by
//! the router: logging happens before routing for every request
//! ([`logger`]), then the route's own stages run in registration order:
//! authentication before validation on the gated write route.
//!
//! Stages observe the request only; none of them sees the response.

pub mod auth;
pub mod logger;
pub mod validate;

use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;

/// A pipeline stage. Returning `Err` short-circuits: later stages and the
/// handler never run, and the error goes straight to the responder.
pub trait Stage: Send + Sync + 'static {
    fn apply(&self, req: &Request) -> Result<(), Error>;
}

/// Shared, type-erased stage as stored in the route table.
pub type BoxedStage = Arc<dyn Stage>;
