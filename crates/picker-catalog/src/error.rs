use thiserror::Error;

/// Failures surfaced by the catalog search client.
///
/// Every variant renders as a message fit to show inline in the selection
/// popup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API configuration is missing: no {missing} configured. Please check your environment variables.")]
    Configuration { missing: &'static str },

    #[error("API configuration is invalid: base URL \"{base_url}\" {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API endpoint not found. Please check the API URL. ({url})")]
    NotFound { url: String },

    #[error("API authentication failed ({status}). Please check your API key.")]
    Unauthorized { status: u16 },

    #[error("API rate limit exceeded: 429 {reason}")]
    RateLimited { reason: String },

    #[error("API error: {status} {reason}")]
    Api { status: u16, reason: String },

    #[error("Invalid JSON response from API: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}
