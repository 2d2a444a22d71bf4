//! Product record and its write-side payloads.
//!
//! Wire names follow the public JSON surface (`inStock`), field names follow
//! Rust. The identifier is numeric, assigned by the store, and never accepted
//! from client input: [`ProductDraft`] and [`ProductPatch`] simply have no
//! `id` field, so an `id` key in a request body is ignored on deserialize.

use serde::{Deserialize, Serialize};

/// A product record as stored and served.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

/// Create payload. `description` and `category` are optional; `inStock`
/// defaults to `false` when omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "inStock", default)]
    pub in_stock: bool,
}

/// Merge patch for updates: only fields present in the body overwrite the
/// stored record, omitted fields are preserved.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "inStock")]
    pub in_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_optional_fields() {
        let draft: ProductDraft =
            serde_json::from_str(r#"{"name":"Desk","price":120}"#).unwrap();
        assert_eq!(draft.name, "Desk");
        assert_eq!(draft.price, 120.0);
        assert_eq!(draft.description, None);
        assert_eq!(draft.category, None);
        assert!(!draft.in_stock);
    }

    #[test]
    fn patch_ignores_id_key() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"id":999,"name":"Desk","price":1}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Desk"));
        assert_eq!(patch.price, Some(1.0));
    }

    #[test]
    fn product_serializes_wire_names() {
        let product = Product {
            id: 7,
            name: "Lamp".to_owned(),
            description: None,
            price: 20.0,
            category: Some("home".to_owned()),
            in_stock: true,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["inStock"], serde_json::json!(true));
        assert_eq!(value["id"], serde_json::json!(7));
    }
}
