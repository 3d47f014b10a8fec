mod app_config;
mod config;
pub mod discount;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use discount::{sanitize_discount_value, Discount, DiscountEvent, DiscountUnit};
pub use products::{
    new_row_id, Product, SelectedProduct, SelectedVariant, Variant, PLACEHOLDER_IMAGE,
    PLACEHOLDER_NAME,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
