//! The popup's working set of search results and their selection flags.
//!
//! Selection lives on variants. A product's `selected` flag is derived: after
//! every mutation [`WorkingSet::recompute`] sets it to whether any of its
//! variants is selected.

use std::collections::HashSet;

use picker_catalog::CatalogProduct;
use picker_core::{SelectedProduct, SelectedVariant, PLACEHOLDER_IMAGE};

/// Accumulated search results for the current term.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    products: Vec<CatalogProduct>,
}

impl WorkingSet {
    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// Replaces the working set with a fresh first page.
    pub fn replace(&mut self, products: Vec<CatalogProduct>) {
        self.products.clear();
        self.extend_unique(products);
    }

    /// Appends a later page, skipping products whose id is already present.
    /// Returns how many were added.
    pub fn extend_unique(&mut self, products: Vec<CatalogProduct>) -> usize {
        let mut seen: HashSet<String> = self.products.iter().map(|p| p.id.clone()).collect();
        let before = self.products.len();
        for product in products {
            if seen.insert(product.id.clone()) {
                self.products.push(product);
            }
        }
        self.recompute();
        self.products.len() - before
    }

    /// Selects every variant of an unselected product, or clears every
    /// variant of a selected one. Returns `false` for an unknown id.
    pub fn toggle_product(&mut self, product_id: &str) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) else {
            return false;
        };
        let target = !product.selected;
        for variant in &mut product.variants {
            variant.selected = target;
        }
        self.recompute();
        true
    }

    /// Flips one variant. Inert (returns `false`) while the parent product
    /// is not selected, or for unknown ids.
    pub fn toggle_variant(&mut self, product_id: &str, variant_id: &str) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) else {
            return false;
        };
        if !product.selected {
            return false;
        }
        let Some(variant) = product.variants.iter_mut().find(|v| v.id == variant_id) else {
            return false;
        };
        variant.selected = !variant.selected;
        self.recompute();
        true
    }

    /// Number of selected variants across all products.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.products
            .iter()
            .flat_map(|p| &p.variants)
            .filter(|v| v.selected)
            .count()
    }

    /// The selected products, in working-set order, each with only its
    /// selected variants.
    #[must_use]
    pub fn selections(&self) -> Vec<SelectedProduct> {
        self.products
            .iter()
            .filter(|p| p.selected)
            .map(|product| SelectedProduct {
                id: product.id.clone(),
                name: product.title.clone(),
                image: product
                    .image
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
                variants: product
                    .variants
                    .iter()
                    .filter(|v| v.selected)
                    .map(|v| SelectedVariant::from_catalog(&v.id, &v.title, &v.price))
                    .collect(),
            })
            .collect()
    }

    /// Re-derives every product flag from its variants.
    fn recompute(&mut self) {
        for product in &mut self.products {
            product.selected = product.variants.iter().any(|v| v.selected);
        }
    }
}
