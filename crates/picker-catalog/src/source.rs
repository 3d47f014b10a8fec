use std::future::Future;

use crate::error::CatalogError;
use crate::types::CatalogPage;

/// Something that can answer a paginated catalog search.
///
/// [`crate::CatalogClient`] is the HTTP implementation; the picker session is
/// generic over this trait so it can run against an in-memory catalog.
pub trait CatalogSource {
    /// Fetches page `page` (zero-based) of results for `term`. An empty
    /// term means no filter.
    fn search(
        &self,
        term: &str,
        page: u32,
    ) -> impl Future<Output = Result<CatalogPage, CatalogError>> + Send;
}
