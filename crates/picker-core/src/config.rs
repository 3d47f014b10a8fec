use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset for the catalog endpoint and key.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("PICKER_ENV", "development"))?;
    let log_level = or_default("PICKER_LOG_LEVEL", "info");
    let catalog_base_url = optional("PICKER_API_BASE_URL");
    let catalog_api_key = optional("PICKER_API_KEY");

    let request_timeout_secs = parse_u64("PICKER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PICKER_USER_AGENT", "product-picker/0.1");
    let max_attempts = parse_u32("PICKER_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(invalid(
            "PICKER_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }
    let rate_limit_delay_ms = parse_u64("PICKER_RATE_LIMIT_DELAY_MS", "2000")?;
    let retry_delay_ms = parse_u64("PICKER_RETRY_DELAY_MS", "1000")?;
    let search_debounce_ms = parse_u64("PICKER_SEARCH_DEBOUNCE_MS", "300")?;
    // The mock record is a development aid; other environments opt in.
    let mock_default = if env == Environment::Development {
        "true"
    } else {
        "false"
    };
    let dev_mock_records = parse_bool("PICKER_DEV_MOCK_RECORDS", mock_default)?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_base_url,
        catalog_api_key,
        request_timeout_secs,
        user_agent,
        max_attempts,
        rate_limit_delay_ms,
        retry_delay_ms,
        search_debounce_ms,
        dev_mock_records,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PICKER_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
