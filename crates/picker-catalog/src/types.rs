//! Catalog search response shapes.
//!
//! The search endpoint is not consistent about its envelope. Observed bodies:
//!
//! - a bare JSON array of products;
//! - an object with a `products` array;
//! - an object whose product list sits under some other key (`data`,
//!   `items`, ...), in which case the first array-valued field wins;
//! - an empty body on a 200 when nothing matches.
//!
//! Product records themselves are loosely typed: `id` may be a number or a
//! string, `title` and `variants` may be missing, and variant `price` is a
//! decimal string. Records are kept as [`serde_json::Value`] until
//! [`crate::normalize`] maps them onto [`CatalogProduct`].

use serde::Serialize;
use serde_json::Value;

use crate::error::CatalogError;

/// A classified search response body.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    /// Empty or whitespace-only body.
    Blank,
    /// Top-level JSON array.
    List(Vec<Value>),
    /// Object with a `products` array.
    Wrapped(Vec<Value>),
    /// Object without a `products` array; `field` is the first array-valued
    /// key in document order.
    FirstArray { field: String, items: Vec<Value> },
    /// Valid JSON with no array to read products from.
    Unrecognized { shape: String },
}

impl CatalogPayload {
    /// Classifies a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidJson`] if a non-blank body is not JSON.
    pub fn parse(body: &str) -> Result<Self, CatalogError> {
        if body.trim().is_empty() {
            return Ok(Self::Blank);
        }
        let value: Value =
            serde_json::from_str(body).map_err(|source| CatalogError::InvalidJson { source })?;
        Ok(Self::classify(value))
    }

    /// Classifies an already-parsed JSON document.
    #[must_use]
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(map) => {
                let mut keys = Vec::with_capacity(map.len());
                let mut first_array: Option<(String, Vec<Value>)> = None;
                for (key, field) in map {
                    if let Value::Array(items) = field {
                        if key == "products" {
                            return Self::Wrapped(items);
                        }
                        if first_array.is_none() {
                            first_array = Some((key, items));
                            continue;
                        }
                    }
                    keys.push(key);
                }
                match first_array {
                    Some((field, items)) => Self::FirstArray { field, items },
                    None => Self::Unrecognized {
                        shape: format!("object with keys [{}]", keys.join(", ")),
                    },
                }
            }
            Value::Null => Self::Unrecognized {
                shape: "null".to_owned(),
            },
            Value::Bool(_) => Self::Unrecognized {
                shape: "boolean".to_owned(),
            },
            Value::Number(_) => Self::Unrecognized {
                shape: "number".to_owned(),
            },
            Value::String(_) => Self::Unrecognized {
                shape: "string".to_owned(),
            },
        }
    }
}

/// One page of normalized search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogPage {
    pub products: Vec<CatalogProduct>,
    /// `true` iff this page contained at least one product.
    pub has_more: bool,
}

impl CatalogPage {
    /// The "no results" page.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A search result, with the selection flag the popup works on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogProduct {
    /// Catalog identifier; generated when the record has none.
    pub id: String,
    pub title: String,
    /// `image.src` from the record, if any.
    pub image: Option<String>,
    /// Never empty: records without variants get a synthetic default.
    pub variants: Vec<CatalogVariant>,
    /// `true` iff at least one variant is selected.
    pub selected: bool,
}

/// A purchasable variant of a [`CatalogProduct`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogVariant {
    pub id: String,
    /// Usually `"size / color"`, e.g. `"Large / Blue"`.
    pub title: String,
    /// Decimal string, e.g. `"19.99"`.
    pub price: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_body_is_blank() {
        assert_eq!(CatalogPayload::parse("").unwrap(), CatalogPayload::Blank);
        assert_eq!(CatalogPayload::parse("  \n").unwrap(), CatalogPayload::Blank);
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = CatalogPayload::parse("<html>oops</html>").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson { .. }));
    }

    #[test]
    fn bare_array_is_list() {
        let payload = CatalogPayload::classify(json!([{"id": 1}]));
        assert_eq!(payload, CatalogPayload::List(vec![json!({"id": 1})]));
    }

    #[test]
    fn products_key_wins_over_earlier_arrays() {
        let payload = CatalogPayload::classify(json!({
            "tags": ["a"],
            "products": [{"id": 2}]
        }));
        assert_eq!(payload, CatalogPayload::Wrapped(vec![json!({"id": 2})]));
    }

    #[test]
    fn first_array_field_in_document_order() {
        let payload =
            CatalogPayload::parse(r#"{"total": 3, "zeta": [{"id": 1}], "alpha": [{"id": 2}]}"#)
                .unwrap();
        assert_eq!(
            payload,
            CatalogPayload::FirstArray {
                field: "zeta".to_owned(),
                items: vec![json!({"id": 1})],
            }
        );
    }

    #[test]
    fn non_array_products_key_falls_through() {
        let payload = CatalogPayload::classify(json!({"products": null, "data": []}));
        assert_eq!(
            payload,
            CatalogPayload::FirstArray {
                field: "data".to_owned(),
                items: vec![],
            }
        );
    }

    #[test]
    fn object_without_arrays_is_unrecognized() {
        let payload = CatalogPayload::classify(json!({"message": "ok", "count": 0}));
        assert_eq!(
            payload,
            CatalogPayload::Unrecognized {
                shape: "object with keys [message, count]".to_owned()
            }
        );
    }

    #[test]
    fn scalars_are_unrecognized() {
        for value in [json!(null), json!(true), json!(3), json!("text")] {
            assert!(matches!(
                CatalogPayload::classify(value),
                CatalogPayload::Unrecognized { .. }
            ));
        }
    }
}
