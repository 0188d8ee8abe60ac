//! Shared vocabulary for the vitrine catalog: the `Product` view model,
//! BRL price formatting, and application configuration.

use thiserror::Error;

mod app_config;
mod config;
pub mod money;
mod product;

pub use app_config::{AppConfig, RenderStrategy};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::Product;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value cannot be parsed.
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
