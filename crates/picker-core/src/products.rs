use serde::Serialize;
use uuid::Uuid;

use crate::discount::Discount;

/// Display name of the unconfigured row the editor starts with.
pub const PLACEHOLDER_NAME: &str = "Select Product";

/// Image reference used when a product has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=40&width=40";

/// Generates a fresh row identifier.
#[must_use]
pub fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

/// A row in the committed product list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Row identifier, unique within the editing session.
    pub id: String,
    pub name: String,
    pub image: String,
    pub variants: Vec<Variant>,
    pub discount: Option<Discount>,
    /// Whether the variant rows are expanded.
    pub show_variants: bool,
}

impl Product {
    /// An unconfigured "Select Product" row with a fresh id.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: new_row_id(),
            name: PLACEHOLDER_NAME.to_owned(),
            image: PLACEHOLDER_IMAGE.to_owned(),
            variants: Vec::new(),
            discount: None,
            show_variants: false,
        }
    }

    /// Builds a row from a popup selection under the given row id, with no
    /// discount and collapsed variants.
    #[must_use]
    pub fn from_selection(id: String, selection: SelectedProduct) -> Self {
        Self {
            id,
            name: selection.name,
            image: selection.image,
            variants: selection.variants.into_iter().map(Variant::from).collect(),
            discount: None,
            show_variants: false,
        }
    }

    /// `true` for a row that has never been filled from the catalog.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME && self.variants.is_empty()
    }

    /// Variant rows are only rendered for multi-variant products that the
    /// user has expanded.
    #[must_use]
    pub fn shows_variant_rows(&self) -> bool {
        self.show_variants && self.variants.len() > 1
    }

    /// Replaces the catalog content of this row, keeping its id, discount
    /// and expansion state.
    pub fn replace_content(&mut self, selection: SelectedProduct) {
        self.name = selection.name;
        self.image = selection.image;
        self.variants = selection.variants.into_iter().map(Variant::from).collect();
    }
}

/// A variant row under a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub material: String,
    pub price: f64,
    pub discount: Option<Discount>,
}

impl Variant {
    /// The name, or `"size / color / material"` when no name is set.
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{} / {} / {}", self.size, self.color, self.material)
        } else {
            self.name.clone()
        }
    }
}

impl From<SelectedVariant> for Variant {
    fn from(selected: SelectedVariant) -> Self {
        Self {
            id: selected.id,
            name: selected.name,
            size: selected.size,
            color: selected.color,
            material: String::new(),
            price: selected.price,
            discount: None,
        }
    }
}

/// A product chosen in the selection popup, handed to the editor on confirm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedProduct {
    /// Catalog identifier of the product.
    pub id: String,
    pub name: String,
    pub image: String,
    /// Only the variants the user ticked, in catalog order.
    pub variants: Vec<SelectedVariant>,
}

/// A variant chosen in the selection popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedVariant {
    pub id: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub price: f64,
}

impl SelectedVariant {
    /// Builds a selected variant from its catalog title and price string.
    ///
    /// Titles are formatted `"size / color"`; a title without a separator is
    /// all size. A price that does not parse becomes `0.0`.
    #[must_use]
    pub fn from_catalog(id: &str, title: &str, price: &str) -> Self {
        let mut parts = title.split(" / ");
        let size = parts.next().unwrap_or_default().to_owned();
        let color = parts.next().unwrap_or_default().to_owned();
        Self {
            id: id.to_owned(),
            name: title.to_owned(),
            size,
            color,
            price: price.trim().parse::<f64>().unwrap_or(0.0),
        }
    }
}
