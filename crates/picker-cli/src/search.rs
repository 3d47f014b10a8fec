//! The `search` command: one page of normalized catalog results.

use picker_catalog::CatalogClient;
use picker_core::AppConfig;

/// Fetches page `page` for `term` and prints it.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the catalog is not
/// configured, or every attempt fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    term: &str,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let client = CatalogClient::from_config(config)?;
    let results = client.search_page(term, page).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.products.is_empty() {
        println!("no products found for '{term}' on page {page}");
        return Ok(());
    }

    println!("{:<24}{:<40}VARIANTS", "ID", "TITLE");
    for product in &results.products {
        println!(
            "{:<24}{:<40}{}",
            product.id,
            product.title,
            product.variants.len()
        );
        for variant in &product.variants {
            println!("{:<24}  {:<38}{}", "", variant.title, variant.price);
        }
    }
    if results.has_more {
        println!("more results: --page {}", page + 1);
    }

    Ok(())
}
