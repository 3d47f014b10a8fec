//! Client-side state for the product picker: the selection popup, its
//! search debounce, the committed product list editor, and the session that
//! ties them to a catalog source.

pub mod debounce;
pub mod editor;
pub mod error;
pub mod popup;
pub mod selection;
pub mod session;

pub use debounce::{SearchDebouncer, SEARCH_DEBOUNCE};
pub use editor::ProductListEditor;
pub use error::EditorError;
pub use popup::{
    Confirmation, FetchRequest, PopupMode, PopupPhase, ScrollGeometry, SelectionPopup,
    SCROLL_LOOKAHEAD_PX,
};
pub use selection::WorkingSet;
pub use session::PickerSession;
