//! HTTP client for the catalog's `products/search` endpoint.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use picker_core::AppConfig;
use reqwest::{Client, StatusCode, Url};

use crate::error::CatalogError;
use crate::normalize::normalize_page;
use crate::retry::{retry_with_policy, RetryPolicy};
use crate::source::CatalogSource;
use crate::types::{CatalogPage, CatalogPayload};

/// Results requested per page.
pub const PAGE_SIZE: u32 = 10;

const API_KEY_HEADER: &str = "x-api-key";

/// Characters left unescaped in the search term, as in JavaScript's
/// `encodeURIComponent` (minus `'`, which the query parser would escape).
const TERM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// HTTP client for the product catalog search endpoint.
///
/// The base URL and API key are optional at construction so the client can
/// be built from partial configuration; a search without either fails with
/// [`CatalogError::Configuration`].
///
/// Each search is attempted according to the [`RetryPolicy`] (three attempts
/// by default, 2 s after a 429, 1 s after other failures).
pub struct CatalogClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    retry: RetryPolicy,
    dev_mock_records: bool,
}

impl CatalogClient {
    /// Creates a client with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: Option<&str>,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.map(str::to_owned),
            api_key: api_key.map(str::to_owned),
            retry: RetryPolicy::default(),
            dev_mock_records: false,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let retry = RetryPolicy {
            max_attempts: config.max_attempts,
            rate_limit_delay: Duration::from_millis(config.rate_limit_delay_ms),
            failure_delay: Duration::from_millis(config.retry_delay_ms),
        };
        Ok(Self::new(
            config.catalog_base_url.as_deref(),
            config.catalog_api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry_policy(retry)
        .with_dev_mock_records(config.dev_mock_records))
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Substitute a diagnostic record for unrecognized payloads.
    #[must_use]
    pub fn with_dev_mock_records(mut self, enabled: bool) -> Self {
        self.dev_mock_records = enabled;
        self
    }

    /// Fetches one page of search results.
    ///
    /// An empty body or a payload with no product array is an empty page,
    /// not an error.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Configuration`] / [`CatalogError::InvalidBaseUrl`]:
    ///   no usable endpoint or key (not retried).
    /// - [`CatalogError::Network`]: no response after all attempts.
    /// - [`CatalogError::NotFound`]: HTTP 404 on the last attempt.
    /// - [`CatalogError::Unauthorized`]: HTTP 401/403 on the last attempt.
    /// - [`CatalogError::RateLimited`]: HTTP 429 on the last attempt.
    /// - [`CatalogError::Api`]: any other non-2xx status on the last attempt.
    /// - [`CatalogError::InvalidJson`]: the body is not JSON (not retried).
    pub async fn search_page(&self, term: &str, page: u32) -> Result<CatalogPage, CatalogError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(CatalogError::Configuration {
                missing: "base URL",
            })?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CatalogError::Configuration { missing: "API key" })?;
        let url = Self::search_url(base_url, term, page)?;
        tracing::debug!(%url, page, "searching catalog");

        let body = retry_with_policy(self.retry, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.as_str())
                    .header(API_KEY_HEADER, api_key)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();
                tracing::debug!(status = status.as_u16(), "catalog responded");

                if status == StatusCode::TOO_MANY_REQUESTS {
                    return Err(CatalogError::RateLimited {
                        reason: reason_phrase(status),
                    });
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound {
                        url: url.to_string(),
                    });
                }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(CatalogError::Unauthorized {
                        status: status.as_u16(),
                    });
                }
                if !status.is_success() {
                    return Err(CatalogError::Api {
                        status: status.as_u16(),
                        reason: reason_phrase(status),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await?;

        let payload = CatalogPayload::parse(&body)?;
        Ok(normalize_page(payload, self.dev_mock_records))
    }

    /// Builds `{base_url}/products/search?search=..&page=..&limit=10`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the base URL does not
    /// parse or cannot carry a path.
    fn search_url(base_url: &str, term: &str, page: u32) -> Result<Url, CatalogError> {
        let base = format!("{}/products/search", base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "is not a hierarchical URL".to_owned(),
            });
        }

        // Spaces go out as %20, not the form-encoded `+`.
        let term = utf8_percent_encode(term, TERM_ENCODE_SET);
        url.set_query(Some(&format!("search={term}&page={page}&limit={PAGE_SIZE}")));
        Ok(url)
    }
}

impl CatalogSource for CatalogClient {
    fn search(
        &self,
        term: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<CatalogPage, CatalogError>> + Send {
        self.search_page(term, page)
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_owned()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
