//! The committed product list and every edit the list view can make to it.
//!
//! Drag-and-drop reordering is modelled as explicit transient markers: a
//! drag start records the source index, each drag enter overwrites the
//! target, and drag end performs the move only if both are present. The
//! markers are cleared on every drag end, whether or not a move happened.

use picker_core::{
    new_row_id, Discount, DiscountEvent, DiscountUnit, Product, SelectedProduct, Variant,
};

use crate::error::EditorError;
use crate::popup::PopupMode;

/// Source/target marker for a variant drag, scoped to one product row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VariantMarker {
    row_id: String,
    index: usize,
}

/// Ordered list of committed product rows. Never empty.
#[derive(Debug, Clone)]
pub struct ProductListEditor {
    products: Vec<Product>,
    drag_source: Option<usize>,
    drag_target: Option<usize>,
    variant_drag_source: Option<VariantMarker>,
    variant_drag_target: Option<VariantMarker>,
}

impl Default for ProductListEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListEditor {
    /// A list holding a single placeholder row.
    #[must_use]
    pub fn new() -> Self {
        Self::from_products(vec![Product::placeholder()])
    }

    /// Starts from an existing list. An empty list gets a placeholder row.
    #[must_use]
    pub fn from_products(mut products: Vec<Product>) -> Self {
        if products.is_empty() {
            products.push(Product::placeholder());
        }
        Self {
            products,
            drag_source: None,
            drag_target: None,
            variant_drag_source: None,
            variant_drag_target: None,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
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

    #[must_use]
    pub fn product(&self, row_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == row_id)
    }

    /// Appends an empty "Select Product" row and returns its id.
    pub fn add_placeholder(&mut self) -> String {
        let row = Product::placeholder();
        let id = row.id.clone();
        tracing::info!(row_id = %id, "added placeholder row");
        self.products.push(row);
        id
    }

    /// Commits a confirmed popup selection according to the popup's mode.
    /// Returns the number of rows added or replaced.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if an edit targets a row that no
    /// longer exists.
    pub fn apply_selection(
        &mut self,
        mode: &PopupMode,
        selections: Vec<SelectedProduct>,
    ) -> Result<usize, EditorError> {
        match mode {
            PopupMode::Append => Ok(self.append_products(selections)),
            PopupMode::Edit { row_id } => self.replace_product(row_id, selections),
        }
    }

    /// Adds selections at the end of the list, each as a fresh row without a
    /// discount. A list holding only the initial placeholder is replaced
    /// instead. Returns the number of rows added.
    pub fn append_products(&mut self, selections: Vec<SelectedProduct>) -> usize {
        if selections.is_empty() {
            return 0;
        }
        let added = selections.len();
        let rows = selections
            .into_iter()
            .map(|selection| Product::from_selection(new_row_id(), selection));

        if self.products.len() == 1 && self.products[0].is_placeholder() {
            self.products = rows.collect();
            tracing::info!(added, "replaced placeholder row with selection");
        } else {
            self.products.extend(rows);
            tracing::info!(added, total = self.products.len(), "appended products");
        }
        added
    }

    /// Fills row `row_id` with the first selection, keeping the row's id,
    /// discount and expansion state. Any further selections are inserted as
    /// fresh rows directly after it. An empty selection changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if no row has that id.
    pub fn replace_product(
        &mut self,
        row_id: &str,
        selections: Vec<SelectedProduct>,
    ) -> Result<usize, EditorError> {
        let index = self.index_of(row_id)?;
        let mut selections = selections.into_iter();
        let Some(first) = selections.next() else {
            return Ok(0);
        };

        self.products[index].replace_content(first);
        let extra: Vec<Product> = selections
            .map(|selection| Product::from_selection(new_row_id(), selection))
            .collect();
        let inserted = extra.len();
        self.products.splice(index + 1..index + 1, extra);

        tracing::info!(row_id, inserted, "replaced product row");
        Ok(inserted + 1)
    }

    /// Removes a row.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LastRow`] when only one row is left, or
    /// [`EditorError::UnknownRow`] if no row has that id.
    pub fn remove_product(&mut self, row_id: &str) -> Result<Product, EditorError> {
        let index = self.index_of(row_id)?;
        if self.products.len() <= 1 {
            return Err(EditorError::LastRow);
        }
        let removed = self.products.remove(index);
        tracing::info!(row_id, remaining = self.products.len(), "removed product row");
        Ok(removed)
    }

    pub fn drag_start(&mut self, index: usize) {
        self.drag_source = Some(index);
    }

    pub fn drag_enter(&mut self, index: usize) {
        self.drag_target = Some(index);
    }

    /// Finishes a row drag. Returns `true` if the list was reordered.
    pub fn drag_end(&mut self) -> bool {
        let source = self.drag_source.take();
        let target = self.drag_target.take();
        let (Some(from), Some(to)) = (source, target) else {
            return false;
        };
        let moved = move_item(&mut self.products, from, to);
        if moved {
            tracing::info!(from, to, "reordered product rows");
        }
        moved
    }

    pub fn variant_drag_start(&mut self, row_id: &str, index: usize) {
        self.variant_drag_source = Some(VariantMarker {
            row_id: row_id.to_owned(),
            index,
        });
    }

    pub fn variant_drag_enter(&mut self, row_id: &str, index: usize) {
        self.variant_drag_target = Some(VariantMarker {
            row_id: row_id.to_owned(),
            index,
        });
    }

    /// Finishes a variant drag. Drags across product rows do nothing.
    /// Returns `true` if the variants were reordered.
    pub fn variant_drag_end(&mut self) -> bool {
        let source = self.variant_drag_source.take();
        let target = self.variant_drag_target.take();
        let (Some(source), Some(target)) = (source, target) else {
            return false;
        };
        if source.row_id != target.row_id {
            return false;
        }
        let Some(product) = self.products.iter_mut().find(|p| p.id == source.row_id) else {
            return false;
        };
        let moved = move_item(&mut product.variants, source.index, target.index);
        if moved {
            tracing::info!(
                row_id = %source.row_id,
                from = source.index,
                to = target.index,
                "reordered variants"
            );
        }
        moved
    }

    /// Expands or collapses a row's variants. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if no row has that id.
    pub fn toggle_variants(&mut self, row_id: &str) -> Result<bool, EditorError> {
        let product = self.product_mut(row_id)?;
        product.show_variants = !product.show_variants;
        Ok(product.show_variants)
    }

    /// The "Add Discount" button: attaches an empty percentage discount to a
    /// row that has none.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if no row has that id.
    pub fn add_discount(&mut self, row_id: &str) -> Result<(), EditorError> {
        let product = self.product_mut(row_id)?;
        if product.discount.is_none() {
            product.discount = Some(Discount::empty(DiscountUnit::PercentOff));
            tracing::info!(row_id, "added discount");
        }
        Ok(())
    }

    /// Applies a discount input event to a row's discount.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if no row has that id.
    pub fn update_discount(
        &mut self,
        row_id: &str,
        event: DiscountEvent,
    ) -> Result<(), EditorError> {
        let product = self.product_mut(row_id)?;
        tracing::info!(row_id, ?event, "updating product discount");
        event.apply(&mut product.discount);
        Ok(())
    }

    /// Applies a discount input event to one variant's discount.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] or [`EditorError::UnknownVariant`]
    /// if the row or the variant does not exist.
    pub fn update_variant_discount(
        &mut self,
        row_id: &str,
        variant_id: &str,
        event: DiscountEvent,
    ) -> Result<(), EditorError> {
        let variant = self.variant_mut(row_id, variant_id)?;
        tracing::info!(row_id, variant_id, ?event, "updating variant discount");
        event.apply(&mut variant.discount);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if no row has that id.
    pub fn remove_discount(&mut self, row_id: &str) -> Result<(), EditorError> {
        self.update_discount(row_id, DiscountEvent::Remove)
    }

    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] or [`EditorError::UnknownVariant`]
    /// if the row or the variant does not exist.
    pub fn remove_variant_discount(
        &mut self,
        row_id: &str,
        variant_id: &str,
    ) -> Result<(), EditorError> {
        self.update_variant_discount(row_id, variant_id, DiscountEvent::Remove)
    }

    fn index_of(&self, row_id: &str) -> Result<usize, EditorError> {
        self.products
            .iter()
            .position(|p| p.id == row_id)
            .ok_or_else(|| EditorError::UnknownRow(row_id.to_owned()))
    }

    fn product_mut(&mut self, row_id: &str) -> Result<&mut Product, EditorError> {
        self.products
            .iter_mut()
            .find(|p| p.id == row_id)
            .ok_or_else(|| EditorError::UnknownRow(row_id.to_owned()))
    }

    fn variant_mut(&mut self, row_id: &str, variant_id: &str) -> Result<&mut Variant, EditorError> {
        self.product_mut(row_id)?
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| EditorError::UnknownVariant {
                row_id: row_id.to_owned(),
                variant_id: variant_id.to_owned(),
            })
    }
}

/// Moves the element at `from` so it ends up at index `to`. Out-of-range
/// indices leave the slice untouched.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
