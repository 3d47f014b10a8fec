//! The product selection popup.
//!
//! ```text
//! Closed --open--> Loading --apply--> Loaded | Empty | Errored
//! Loaded | Empty --term change / page advance--> Loading
//! any --confirm / cancel--> Closed
//! ```
//!
//! The popup never performs I/O itself. Transitions that need data return a
//! [`FetchRequest`]; the caller runs the search and feeds the outcome back
//! through [`SelectionPopup::apply`]. Every working-set reset bumps a
//! generation counter, and outcomes tagged with an older generation (or
//! arriving after close) are dropped.

use picker_catalog::{CatalogError, CatalogPage, CatalogProduct};
use picker_core::SelectedProduct;

use crate::selection::WorkingSet;

/// How far below the viewport the end-of-list sentinel may be and still
/// count as visible, in pixels.
pub const SCROLL_LOOKAHEAD_PX: f64 = 200.0;

/// What a confirmed selection will do to the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupMode {
    /// Add the selected products to the list.
    Append,
    /// Replace the row with this id (and insert any extras after it).
    Edit { row_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    Closed,
    Loading,
    Loaded,
    Empty,
    Errored,
}

/// A search the popup wants run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation the request was issued under.
    pub generation: u64,
    pub term: String,
    pub page: u32,
    /// `true` replaces the working set, `false` appends to it.
    pub reset: bool,
}

/// Position of the end-of-list sentinel relative to the scroll viewport,
/// both measured from the top of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub sentinel_top: f64,
    pub viewport_bottom: f64,
}

impl ScrollGeometry {
    #[must_use]
    pub fn sentinel_in_view(&self) -> bool {
        self.sentinel_top <= self.viewport_bottom + SCROLL_LOOKAHEAD_PX
    }
}

/// A confirmed selection, handed to the product list editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub mode: PopupMode,
    pub products: Vec<SelectedProduct>,
}

/// Search results, selection state and paging for one popup session.
#[derive(Debug)]
pub struct SelectionPopup {
    phase: PopupPhase,
    mode: Option<PopupMode>,
    working: WorkingSet,
    input: String,
    term: String,
    page: u32,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for SelectionPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPopup {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: PopupPhase::Closed,
            mode: None,
            working: WorkingSet::default(),
            input: String::new(),
            term: String::new(),
            page: 0,
            has_more: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Opens the popup with an empty search and requests the first page.
    /// Reopening discards whatever the previous session held.
    pub fn open(&mut self, mode: PopupMode) -> FetchRequest {
        self.close();
        tracing::debug!(?mode, "opening selection popup");
        self.mode = Some(mode);
        self.begin_reset()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != PopupPhase::Closed
    }

    #[must_use]
    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    #[must_use]
    pub fn mode(&self) -> Option<&PopupMode> {
        self.mode.as_ref()
    }

    /// The raw search box contents.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The settled search term the working set belongs to.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `true` while typed input has not settled into the search term yet.
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.input != self.term
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        self.working.products()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.working.selected_count()
    }

    /// Confirm is only offered once something is selected.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.is_open() && self.selected_count() > 0
    }

    /// Records a keystroke. The search itself waits for
    /// [`SelectionPopup::settle_search`].
    pub fn set_input(&mut self, raw: &str) {
        if self.is_open() {
            raw.clone_into(&mut self.input);
        }
    }

    /// Adopts a debounced search term. A term different from the current one
    /// clears the working set and requests its first page.
    pub fn settle_search(&mut self, term: &str) -> Option<FetchRequest> {
        if !self.is_open() || term == self.term {
            return None;
        }
        term.clone_into(&mut self.term);
        Some(self.begin_reset())
    }

    /// Requests the next page when the sentinel scrolls into view, more
    /// results exist, and nothing is in flight.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> Option<FetchRequest> {
        if self.phase != PopupPhase::Loaded
            || self.loading
            || !self.has_more
            || !geometry.sentinel_in_view()
        {
            return None;
        }
        self.page += 1;
        self.loading = true;
        self.phase = PopupPhase::Loading;
        tracing::debug!(page = self.page, term = %self.term, "requesting next catalog page");
        Some(FetchRequest {
            generation: self.generation,
            term: self.term.clone(),
            page: self.page,
            reset: false,
        })
    }

    /// The "Try Again" action: refetches the first page for the current term.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.phase != PopupPhase::Errored {
            return None;
        }
        Some(self.begin_reset())
    }

    /// Feeds a search outcome back. Returns `false` if the outcome was stale
    /// and ignored.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        outcome: Result<CatalogPage, CatalogError>,
    ) -> bool {
        if !self.is_open() || request.generation != self.generation {
            tracing::debug!(
                request_generation = request.generation,
                current_generation = self.generation,
                term = %request.term,
                page = request.page,
                "discarding stale catalog response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                let received = page.products.len();
                if request.reset {
                    self.working.replace(page.products);
                } else {
                    self.working.extend_unique(page.products);
                }
                self.has_more = page.has_more;
                self.error = None;
                self.phase = if self.working.is_empty() {
                    PopupPhase::Empty
                } else {
                    PopupPhase::Loaded
                };
                tracing::debug!(
                    received,
                    total = self.working.len(),
                    has_more = self.has_more,
                    "applied catalog page"
                );
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    term = %request.term,
                    page = request.page,
                    "catalog search failed"
                );
                self.error = Some(format!("Failed to fetch products: {err}"));
                if request.reset {
                    self.working.clear();
                }
                self.has_more = false;
                self.phase = PopupPhase::Errored;
            }
        }
        true
    }

    /// Toggles a product and all its variants.
    pub fn toggle_product(&mut self, product_id: &str) -> bool {
        self.is_open() && self.working.toggle_product(product_id)
    }

    /// Toggles one variant of a selected product.
    pub fn toggle_variant(&mut self, product_id: &str, variant_id: &str) -> bool {
        self.is_open() && self.working.toggle_variant(product_id, variant_id)
    }

    /// Closes the popup and returns the selection, or `None` when nothing is
    /// selected (the popup then stays open).
    pub fn confirm(&mut self) -> Option<Confirmation> {
        if !self.can_confirm() {
            return None;
        }
        let products = self.working.selections();
        let mode = self.mode.take().unwrap_or(PopupMode::Append);
        self.close();
        Some(Confirmation { mode, products })
    }

    /// Closes the popup, discarding all working state.
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::debug!("selection popup cancelled");
        }
        self.close();
    }

    fn close(&mut self) {
        self.phase = PopupPhase::Closed;
        self.mode = None;
        self.working.clear();
        self.input.clear();
        self.term.clear();
        self.page = 0;
        self.has_more = false;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }

    fn begin_reset(&mut self) -> FetchRequest {
        self.generation += 1;
        self.working.clear();
        self.page = 0;
        self.has_more = true;
        self.loading = true;
        self.error = None;
        self.phase = PopupPhase::Loading;
        FetchRequest {
            generation: self.generation,
            term: self.term.clone(),
            page: 0,
            reset: true,
        }
    }
}

#[cfg(test)]
#[path = "popup_test.rs"]
mod tests;
