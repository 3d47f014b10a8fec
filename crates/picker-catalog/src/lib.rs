pub mod client;
pub mod error;
pub mod normalize;
pub mod retry;
pub mod source;
pub mod types;

pub use client::{CatalogClient, PAGE_SIZE};
pub use error::CatalogError;
pub use normalize::{normalize_page, normalize_product};
pub use retry::RetryPolicy;
pub use source::CatalogSource;
pub use types::{CatalogPage, CatalogPayload, CatalogProduct, CatalogVariant};
