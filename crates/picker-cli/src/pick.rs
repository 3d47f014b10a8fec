//! The `pick` command drives a full picker session non-interactively.

use std::time::Duration;

use anyhow::Context;
use picker_catalog::CatalogClient;
use picker_core::{AppConfig, DiscountEvent, DiscountUnit};
use picker_session::PickerSession;

#[derive(Debug, Clone)]
pub(crate) struct PickOptions {
    pub term: String,
    pub take: usize,
    pub discount: Option<String>,
    pub fixed: bool,
}

/// Opens the popup, settles the search term, selects the first `take`
/// results, confirms, and prints the committed list.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the search fails, or no
/// result could be selected.
pub(crate) async fn run_pick(config: &AppConfig, options: &PickOptions) -> anyhow::Result<()> {
    let client = CatalogClient::from_config(config)?;
    let mut session = PickerSession::new(client, Duration::from_millis(config.search_debounce_ms));

    let mut request = session.open_add();
    if !options.term.is_empty() {
        session.type_search(&options.term);
        if let Some(settled) = session.next_settled_search().await {
            request = settled;
        }
    }
    session.run(request).await;

    if let Some(message) = session.popup().error() {
        anyhow::bail!("{message}");
    }

    let ids: Vec<String> = session
        .popup()
        .products()
        .iter()
        .take(options.take)
        .map(|p| p.id.clone())
        .collect();
    for id in &ids {
        session.popup_mut().toggle_product(id);
    }
    tracing::debug!(selected = session.popup().selected_count(), "confirming selection");

    let committed = session.confirm()?;
    if committed == 0 {
        anyhow::bail!("no products matched '{}'", options.term);
    }

    if let Some(value) = &options.discount {
        let unit = if options.fixed {
            DiscountUnit::Fixed
        } else {
            DiscountUnit::PercentOff
        };
        let rows: Vec<String> = session
            .editor()
            .products()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        let editor = session.editor_mut();
        for row in &rows {
            editor
                .update_discount(row, DiscountEvent::SetValue(value.clone()))
                .with_context(|| format!("applying discount to row {row}"))?;
            editor.update_discount(row, DiscountEvent::SetUnit(unit))?;
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(session.editor().products())?
    );
    Ok(())
}
