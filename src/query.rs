//! Read-side query engine: pure transformations over a store snapshot.
//!
//! Nothing here touches the store or holds state: every function takes a
//! `&[Product]` slice and computes a view. Semantics:
//!
//! - category filter is exact and case-sensitive
//! - search is a case-insensitive substring match on the name
//! - pagination clamps to bounds: an out-of-range page is an empty data
//!   slice, never an error
//! - statistics group records with no category under [`UNCATEGORIZED`]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::product::Product;

/// Sentinel label for records with no category in the statistics view.
pub const UNCATEGORIZED: &str = "Uncategorized";

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Pagination envelope returned by the listing endpoint.
#[derive(Debug, Serialize)]
pub struct PageEnvelope {
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "totalProduct")]
    pub total_product: usize,
    #[serde(rename = "totalPage")]
    pub total_page: usize,
    pub data: Vec<Product>,
}

/// Aggregate counts returned by the stats endpoint.
#[derive(Debug, Serialize)]
pub struct CategoryStats {
    #[serde(rename = "totalProduct")]
    pub total_product: usize,
    #[serde(rename = "countByCategory")]
    pub count_by_category: BTreeMap<String, usize>,
}

pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category.as_deref() == Some(category))
        .cloned()
        .collect()
}

/// Parses `page`/`limit` query values. Unparsable or sub-1 values fall back
/// to the defaults rather than erroring.
pub fn page_params(page: Option<&str>, limit: Option<&str>) -> (usize, usize) {
    let parse = |raw: Option<&str>, default: usize| {
        raw.and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(default)
    };
    (parse(page, DEFAULT_PAGE), parse(limit, DEFAULT_LIMIT))
}

/// Slice `[(page-1)*limit, page*limit)` clamped to the collection bounds.
///
/// Callers must pass `page, limit >= 1` (see [`page_params`]).
pub fn paginate(products: &[Product], page: usize, limit: usize) -> PageEnvelope {
    let total = products.len();
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    PageEnvelope {
        page,
        limit,
        total_product: total,
        total_page: total.div_ceil(limit),
        data: products[start..end].to_vec(),
    }
}

pub fn search_by_name(products: &[Product], needle: &str) -> Vec<Product> {
    let needle = needle.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn count_by_category(products: &[Product]) -> CategoryStats {
    let mut counts = BTreeMap::new();
    for product in products {
        let label = product
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        *counts.entry(label.to_owned()).or_insert(0) += 1;
    }
    CategoryStats {
        total_product: products.len(),
        count_by_category: counts,
    }
}
