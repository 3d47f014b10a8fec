use std::time::Duration;

use picker_catalog::CatalogSource;
use tokio::sync::mpsc;

use crate::debounce::SearchDebouncer;
use crate::editor::ProductListEditor;
use crate::error::EditorError;
use crate::popup::{FetchRequest, PopupMode, ScrollGeometry, SelectionPopup};

/// One editing session: the committed list, the selection popup, and the
/// catalog the popup searches.
///
/// The session owns all state. Searches run through [`PickerSession::run`],
/// which awaits the catalog and hands the outcome back to the popup, so a
/// response that arrives after the popup moved on is dropped there.
pub struct PickerSession<S> {
    source: S,
    editor: ProductListEditor,
    popup: SelectionPopup,
    debouncer: SearchDebouncer,
    settled: mpsc::UnboundedReceiver<String>,
}

impl<S: CatalogSource> PickerSession<S> {
    /// Must be called inside a tokio runtime.
    pub fn new(source: S, debounce: Duration) -> Self {
        let (debouncer, settled) = SearchDebouncer::new(debounce);
        Self {
            source,
            editor: ProductListEditor::new(),
            popup: SelectionPopup::new(),
            debouncer,
            settled,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &ProductListEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProductListEditor {
        &mut self.editor
    }

    #[must_use]
    pub fn popup(&self) -> &SelectionPopup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut SelectionPopup {
        &mut self.popup
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Opens the popup to add products.
    pub fn open_add(&mut self) -> FetchRequest {
        self.reset_search();
        self.popup.open(PopupMode::Append)
    }

    /// Opens the popup to replace row `row_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if the row does not exist.
    pub fn open_edit(&mut self, row_id: &str) -> Result<FetchRequest, EditorError> {
        if self.editor.product(row_id).is_none() {
            return Err(EditorError::UnknownRow(row_id.to_owned()));
        }
        self.reset_search();
        Ok(self.popup.open(PopupMode::Edit {
            row_id: row_id.to_owned(),
        }))
    }

    /// Records a keystroke in the search box and restarts the debounce
    /// timer.
    pub fn type_search(&mut self, raw: &str) {
        if !self.popup.is_open() {
            return;
        }
        self.popup.set_input(raw);
        self.debouncer.push(raw);
    }

    /// Waits for the next settled search term. Returns the fetch it triggers,
    /// or `None` when the settled term needs no fetch.
    pub async fn next_settled_search(&mut self) -> Option<FetchRequest> {
        let term = self.settled.recv().await?;
        self.popup.settle_search(&term)
    }

    pub fn scrolled(&mut self, geometry: ScrollGeometry) -> Option<FetchRequest> {
        self.popup.on_scroll(geometry)
    }

    pub fn retry(&mut self) -> Option<FetchRequest> {
        self.popup.retry()
    }

    /// Runs a search and applies its outcome. Returns `false` if the outcome
    /// was stale and discarded.
    pub async fn run(&mut self, request: FetchRequest) -> bool {
        tracing::debug!(
            term = %request.term,
            page = request.page,
            generation = request.generation,
            "running catalog search"
        );
        let outcome = self.source.search(&request.term, request.page).await;
        self.popup.apply(&request, outcome)
    }

    /// Confirms the popup selection into the product list. Returns the number
    /// of rows added or replaced; `0` when nothing was selected.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownRow`] if the edited row disappeared
    /// while the popup was open.
    pub fn confirm(&mut self) -> Result<usize, EditorError> {
        let Some(confirmation) = self.popup.confirm() else {
            return Ok(0);
        };
        self.reset_search();
        self.editor
            .apply_selection(&confirmation.mode, confirmation.products)
    }

    pub fn cancel(&mut self) {
        self.popup.cancel();
        self.reset_search();
    }

    fn reset_search(&mut self) {
        self.debouncer.cancel();
        while self.settled.try_recv().is_ok() {}
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
