use picker_catalog::{CatalogError, CatalogPage, CatalogProduct, CatalogVariant};

use super::*;

fn product(id: &str, variant_count: usize) -> CatalogProduct {
    CatalogProduct {
        id: id.to_owned(),
        title: format!("Product {id}"),
        image: None,
        variants: (0..variant_count)
            .map(|i| CatalogVariant {
                id: format!("{id}-v{i}"),
                title: "M / Blue".to_owned(),
                price: "12.50".to_owned(),
                selected: false,
            })
            .collect(),
        selected: false,
    }
}

fn page_of(ids: &[&str]) -> CatalogPage {
    CatalogPage {
        products: ids.iter().map(|id| product(id, 2)).collect(),
        has_more: !ids.is_empty(),
    }
}

const IN_VIEW: ScrollGeometry = ScrollGeometry {
    sentinel_top: 650.0,
    viewport_bottom: 500.0,
};

fn opened_with(ids: &[&str]) -> SelectionPopup {
    let mut popup = SelectionPopup::new();
    let request = popup.open(PopupMode::Append);
    assert!(popup.apply(&request, Ok(page_of(ids))));
    popup
}

fn ids(popup: &SelectionPopup) -> Vec<&str> {
    popup.products().iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn open_requests_first_page_of_blank_term() {
    let mut popup = SelectionPopup::new();
    assert_eq!(popup.phase(), PopupPhase::Closed);

    let request = popup.open(PopupMode::Append);
    assert_eq!(request.term, "");
    assert_eq!(request.page, 0);
    assert!(request.reset);
    assert_eq!(popup.phase(), PopupPhase::Loading);
    assert!(popup.is_loading());
    assert!(popup.has_more());
}

#[test]
fn applying_results_moves_to_loaded_or_empty() {
    let popup = opened_with(&["a", "b"]);
    assert_eq!(popup.phase(), PopupPhase::Loaded);
    assert!(!popup.is_loading());
    assert_eq!(ids(&popup), ["a", "b"]);

    let popup = opened_with(&[]);
    assert_eq!(popup.phase(), PopupPhase::Empty);
    assert!(!popup.has_more());
}

#[test]
fn stale_blank_term_response_is_discarded() {
    let mut popup = SelectionPopup::new();
    let blank = popup.open(PopupMode::Append);

    popup.set_input("shirt");
    let shirt = popup.settle_search("shirt").expect("term changed");
    assert!(shirt.generation > blank.generation);

    assert!(popup.apply(&shirt, Ok(page_of(&["shirt-1"]))));
    assert!(!popup.apply(&blank, Ok(page_of(&["hat-1", "hat-2"]))));

    assert_eq!(ids(&popup), ["shirt-1"]);
    assert_eq!(popup.term(), "shirt");
}

#[test]
fn settling_same_term_does_not_refetch() {
    let mut popup = opened_with(&["a"]);
    assert!(popup.settle_search("").is_none());
    let request = popup.settle_search("tee").expect("new term");
    assert_eq!(request.page, 0);
    assert!(popup.products().is_empty());
    assert!(popup.settle_search("tee").is_none());
}

#[test]
fn search_pending_until_input_settles() {
    let mut popup = opened_with(&["a"]);
    popup.set_input("te");
    assert!(popup.is_search_pending());
    assert!(!popup.is_loading());
    popup.settle_search("te");
    assert!(!popup.is_search_pending());
}

#[test]
fn scroll_requests_next_page_once() {
    let mut popup = opened_with(&["a", "b"]);
    let next = popup.on_scroll(IN_VIEW).expect("sentinel in view");
    assert_eq!(next.page, 1);
    assert!(!next.reset);
    assert!(popup.on_scroll(IN_VIEW).is_none(), "already loading");

    assert!(popup.apply(&next, Ok(page_of(&["b", "c"]))));
    assert_eq!(ids(&popup), ["a", "b", "c"]);
    assert_eq!(popup.page(), 1);
}

#[test]
fn scroll_ignored_when_sentinel_far_below() {
    let mut popup = opened_with(&["a"]);
    let far = ScrollGeometry {
        sentinel_top: 900.0,
        viewport_bottom: 500.0,
    };
    assert!(!far.sentinel_in_view());
    assert!(popup.on_scroll(far).is_none());
}

#[test]
fn scroll_stops_after_empty_page() {
    let mut popup = opened_with(&["a"]);
    let next = popup.on_scroll(IN_VIEW).expect("more available");
    popup.apply(&next, Ok(CatalogPage::empty()));
    assert!(!popup.has_more());
    assert_eq!(popup.phase(), PopupPhase::Loaded);
    assert!(popup.on_scroll(IN_VIEW).is_none());
}

#[test]
fn scroll_ignored_with_empty_working_set() {
    let mut popup = opened_with(&[]);
    assert!(popup.on_scroll(IN_VIEW).is_none());
}

#[test]
fn fetch_error_sets_message_and_blocks_scroll() {
    let mut popup = SelectionPopup::new();
    let request = popup.open(PopupMode::Append);
    popup.apply(&request, Err(CatalogError::Configuration { missing: "API key" }));

    assert_eq!(popup.phase(), PopupPhase::Errored);
    let message = popup.error().expect("error recorded");
    assert!(message.starts_with("Failed to fetch products: API configuration is missing"));
    assert!(popup.on_scroll(IN_VIEW).is_none());

    let again = popup.retry().expect("retry from error");
    assert_eq!(again.page, 0);
    assert!(popup.error().is_none());
    popup.apply(&again, Ok(page_of(&["a"])));
    assert_eq!(popup.phase(), PopupPhase::Loaded);
}

#[test]
fn failed_next_page_keeps_loaded_products() {
    let mut popup = opened_with(&["a"]);
    let next = popup.on_scroll(IN_VIEW).expect("more available");
    popup.apply(
        &next,
        Err(CatalogError::Api {
            status: 500,
            reason: "Internal Server Error".to_owned(),
        }),
    );
    assert_eq!(ids(&popup), ["a"]);
    assert!(!popup.has_more());
    assert_eq!(
        popup.error(),
        Some("Failed to fetch products: API error: 500 Internal Server Error")
    );
}

#[test]
fn retry_only_available_after_error() {
    let mut popup = opened_with(&["a"]);
    assert!(popup.retry().is_none());
}

#[test]
fn confirm_requires_a_selection() {
    let mut popup = opened_with(&["a", "b"]);
    assert!(!popup.can_confirm());
    assert!(popup.confirm().is_none());
    assert!(popup.is_open());

    popup.toggle_product("b");
    assert_eq!(popup.selected_count(), 2);
    let confirmation = popup.confirm().expect("one product selected");
    assert_eq!(confirmation.mode, PopupMode::Append);
    assert_eq!(confirmation.products.len(), 1);
    assert_eq!(confirmation.products[0].id, "b");
    assert_eq!(popup.phase(), PopupPhase::Closed);
}

#[test]
fn confirm_carries_edit_target() {
    let mut popup = SelectionPopup::new();
    let request = popup.open(PopupMode::Edit {
        row_id: "row-7".to_owned(),
    });
    popup.apply(&request, Ok(page_of(&["a"])));
    popup.toggle_product("a");
    let confirmation = popup.confirm().expect("selected");
    assert_eq!(
        confirmation.mode,
        PopupMode::Edit {
            row_id: "row-7".to_owned()
        }
    );
}

#[test]
fn variant_toggle_requires_selected_parent() {
    let mut popup = opened_with(&["a"]);
    assert!(!popup.toggle_variant("a", "a-v0"));
    popup.toggle_product("a");
    assert!(popup.toggle_variant("a", "a-v0"));
    assert_eq!(popup.selected_count(), 1);
}

#[test]
fn cancel_discards_state_and_late_results() {
    let mut popup = SelectionPopup::new();
    let request = popup.open(PopupMode::Append);
    popup.set_input("hat");
    popup.cancel();

    assert_eq!(popup.phase(), PopupPhase::Closed);
    assert_eq!(popup.input(), "");
    assert!(!popup.apply(&request, Ok(page_of(&["a"]))));
    assert!(popup.products().is_empty());
}

#[test]
fn reopening_starts_fresh() {
    let mut popup = opened_with(&["a"]);
    popup.toggle_product("a");
    popup.set_input("tee");
    popup.settle_search("tee");
    popup.cancel();

    let request = popup.open(PopupMode::Append);
    assert_eq!(request.term, "");
    assert_eq!(popup.input(), "");
    assert_eq!(popup.selected_count(), 0);
    assert!(popup.products().is_empty());
}
