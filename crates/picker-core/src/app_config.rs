#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the picker, read once at startup.
///
/// The catalog base URL and API key are optional here: a missing value is
/// reported as a configuration error on the first search attempt rather
/// than at startup, so the editor stays usable without a catalog.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_base_url: Option<String>,
    pub catalog_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub rate_limit_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub search_debounce_ms: u64,
    pub dev_mock_records: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_base_url", &self.catalog_base_url)
            .field(
                "catalog_api_key",
                &self.catalog_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_attempts", &self.max_attempts)
            .field("rate_limit_delay_ms", &self.rate_limit_delay_ms)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("dev_mock_records", &self.dev_mock_records)
            .finish()
    }
}
