//! Route handlers and the canonical route table.
//!
//! Routing policy: reads are public; creation is the credential-gated route
//! and runs authentication before validation; update runs validation only.
//! Static segments (`/search`, `/stats`) are registered alongside the `{id}`
//! parameter and win the match.

use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;

use crate::config::Config;
use crate::error::Error;
use crate::middleware::BoxedStage;
use crate::middleware::auth::RequireApiKey;
use crate::middleware::validate::ValidateProduct;
use crate::product::{ProductDraft, ProductPatch};
use crate::query;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

pub const WELCOME: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// Builds the route table. One registration per method + path; the gated
/// route lists its stages in execution order.
pub fn router(config: &Config) -> Router {
    let auth: BoxedStage = Arc::new(RequireApiKey::from_config(config));
    let validate: BoxedStage = Arc::new(ValidateProduct);

    Router::new()
        .on(Method::GET, "/", welcome)
        .on(Method::GET, "/api/products", list_products)
        .on(Method::GET, "/api/products/search", search_products)
        .on(Method::GET, "/api/products/stats", product_stats)
        .on(Method::GET, "/api/products/{id}", get_product)
        .on_with(
            Method::POST,
            "/api/products",
            [auth, Arc::clone(&validate)],
            create_product,
        )
        .on_with(Method::PUT, "/api/products/{id}", [validate], update_product)
        .on(Method::DELETE, "/api/products/{id}", delete_product)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn welcome(_req: Request) -> Result<&'static str, Error> {
    Ok(WELCOME)
}

/// `GET /api/products`: the full list, optionally narrowed by an exact
/// `?category=` match, optionally wrapped in the pagination envelope when
/// `?page=` or `?limit=` is present. With both, pagination applies to the
/// filtered set and the totals describe that set.
async fn list_products(req: Request) -> Result<Response, Error> {
    let products = match req.query("category") {
        Some(category) if !category.is_empty() => {
            query::filter_by_category(&req.store().list(), category)
        }
        _ => req.store().list(),
    };

    if req.query("page").is_some() || req.query("limit").is_some() {
        let (page, limit) = query::page_params(req.query("page"), req.query("limit"));
        return json_response(StatusCode::OK, &query::paginate(&products, page, limit));
    }

    json_response(StatusCode::OK, &products)
}

async fn get_product(req: Request) -> Result<Response, Error> {
    let id = req.param_id("id")?;
    let product = req
        .store()
        .get(id)
        .ok_or_else(|| Error::not_found("Product not found"))?;
    json_response(StatusCode::OK, &product)
}

async fn create_product(req: Request) -> Result<Response, Error> {
    let draft: ProductDraft = req.json()?;
    let product = req.store().create(draft);
    json_response(StatusCode::CREATED, &product)
}

async fn update_product(req: Request) -> Result<Response, Error> {
    let id = req.param_id("id")?;
    let patch: ProductPatch = req.json()?;
    let product = req
        .store()
        .update(id, patch)
        .ok_or_else(|| Error::not_found("Product not found"))?;
    json_response(StatusCode::OK, &product)
}

async fn delete_product(req: Request) -> Result<Response, Error> {
    let id = req.param_id("id")?;
    if req.store().delete(id) {
        Ok(Response::status(StatusCode::NO_CONTENT))
    } else {
        Err(Error::not_found("Product not found"))
    }
}

/// `GET /api/products/search?name=`: case-insensitive substring match.
/// A missing query is the client's mistake; zero matches is a not-found.
async fn search_products(req: Request) -> Result<Response, Error> {
    let name = req
        .query("name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::validation("Search query name is required"))?;
    let matches = query::search_by_name(&req.store().list(), name);
    if matches.is_empty() {
        return Err(Error::not_found("No product found matching that name"));
    }
    json_response(StatusCode::OK, &matches)
}

async fn product_stats(req: Request) -> Result<Response, Error> {
    json_response(StatusCode::OK, &query::count_by_category(&req.store().list()))
}

/// Funnels serialization failures into the error channel instead of letting
/// them escape the pipeline.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, Error> {
    let body = serde_json::to_vec(value)
        .map_err(|e| Error::internal(format!("response serialization failed: {e}")))?;
    Ok(Response::builder().status(status).json(body))
}
