//! Product payload validation stage.
//!
//! Runs before the create and update handlers, on the raw body, with a
//! stop-on-first-error policy: the response names the first failing field
//! and nothing else is checked.

use serde_json::Value;

use crate::error::Error;
use crate::middleware::Stage;
use crate::request::Request;

pub struct ValidateProduct;

impl Stage for ValidateProduct {
    fn apply(&self, req: &Request) -> Result<(), Error> {
        let value: Value = serde_json::from_slice(req.body())
            .map_err(|_| Error::validation("Request body must be a JSON object"))?;
        let fields = value
            .as_object()
            .ok_or_else(|| Error::validation("Request body must be a JSON object"))?;

        match fields.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => {}
            Some(Value::String(_)) => {
                return Err(Error::validation("Product name must not be empty"));
            }
            _ => {
                return Err(Error::validation(
                    "Product name is required and must be a string",
                ));
            }
        }

        match fields.get("price") {
            Some(Value::Number(price)) => {
                if price.as_f64().is_some_and(|p| p < 0.0) {
                    return Err(Error::validation("Product price must not be negative"));
                }
            }
            _ => {
                return Err(Error::validation(
                    "Product price is required and must be a number",
                ));
            }
        }

        Ok(())
    }
}
