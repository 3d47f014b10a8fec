//! Normalization from loosely typed catalog records to [`CatalogProduct`].
//!
//! Every product comes out with a non-empty id and title and at least one
//! variant; every variant with a non-empty id, title and price. Selection
//! flags start cleared.

use rand::Rng;
use serde_json::{Map, Value};

use crate::types::{CatalogPage, CatalogPayload, CatalogProduct, CatalogVariant};

const UNNAMED_PRODUCT: &str = "Unnamed Product";
const UNNAMED_VARIANT: &str = "Unnamed Variant";
const DEFAULT_PRICE: &str = "0.00";
const GENERATED_ID_LEN: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Turns a classified payload into a page of results.
///
/// `Blank` and `Unrecognized` payloads are "no results", not errors. With
/// `dev_mock_records` set, an unrecognized payload instead yields a single
/// diagnostic record so the popup has something to render.
#[must_use]
pub fn normalize_page(payload: CatalogPayload, dev_mock_records: bool) -> CatalogPage {
    let items = match payload {
        CatalogPayload::Blank => {
            tracing::debug!("catalog returned an empty body");
            return CatalogPage::empty();
        }
        CatalogPayload::List(items) | CatalogPayload::Wrapped(items) => items,
        CatalogPayload::FirstArray { field, items } => {
            tracing::debug!(field, "reading products from first array-valued field");
            items
        }
        CatalogPayload::Unrecognized { shape } if dev_mock_records => {
            tracing::warn!(shape, "unrecognized catalog payload, substituting mock record");
            vec![mock_record()]
        }
        CatalogPayload::Unrecognized { shape } => {
            tracing::debug!(shape, "unrecognized catalog payload, treating as no results");
            return CatalogPage::empty();
        }
    };

    tracing::debug!(count = items.len(), "normalizing catalog products");
    let has_more = !items.is_empty();
    CatalogPage {
        products: items.into_iter().map(normalize_product).collect(),
        has_more,
    }
}

/// Normalizes one product record. Non-object records become an unnamed
/// product with a generated id.
#[must_use]
pub fn normalize_product(record: Value) -> CatalogProduct {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    let id = id_field(fields, "id").unwrap_or_else(generated_id);
    let title = text_field(fields, "title").unwrap_or_else(|| UNNAMED_PRODUCT.to_owned());
    let image = fields
        .get("image")
        .and_then(Value::as_object)
        .and_then(|image| text_field(image, "src"));

    let mut variants: Vec<CatalogVariant> = fields
        .get("variants")
        .and_then(Value::as_array)
        .map(|records| records.iter().map(normalize_variant).collect())
        .unwrap_or_default();
    if variants.is_empty() {
        variants.push(default_variant(&id));
    }

    CatalogProduct {
        id,
        title,
        image,
        variants,
        selected: false,
    }
}

fn normalize_variant(record: &Value) -> CatalogVariant {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);
    CatalogVariant {
        id: id_field(fields, "id").unwrap_or_else(generated_id),
        title: text_field(fields, "title").unwrap_or_else(|| UNNAMED_VARIANT.to_owned()),
        price: id_field(fields, "price").unwrap_or_else(|| DEFAULT_PRICE.to_owned()),
        selected: false,
    }
}

fn default_variant(product_id: &str) -> CatalogVariant {
    CatalogVariant {
        id: format!("default-{product_id}"),
        title: "Default".to_owned(),
        price: DEFAULT_PRICE.to_owned(),
        selected: false,
    }
}

/// Reads a string or number field as a non-empty string.
fn id_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn generated_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..GENERATED_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("generated-{suffix}")
}

fn mock_record() -> Value {
    serde_json::json!({
        "id": "mock-1",
        "title": "Mock Product",
        "variants": [
            { "id": "mock-v1", "title": "Mock Variant", "price": "9.99" }
        ]
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
