use crate::app_config::{AppConfig, RenderStrategy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let cms_api_url = require("VITRINE_CMS_API_URL")?;
    let cms_access_token = require("VITRINE_CMS_ACCESS_TOKEN")?;

    let bind_addr = parse_addr("VITRINE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VITRINE_LOG_LEVEL", "info");

    let render_strategy =
        parse_render_strategy(&or_default("VITRINE_RENDER_STRATEGY", "blocking-fallback"))?;

    let listing_page_size = parse_u32("VITRINE_LISTING_PAGE_SIZE", "2")?;
    let prebuild_page_size = parse_u32("VITRINE_PREBUILD_PAGE_SIZE", "1")?;
    let revalidate_secs = parse_u64("VITRINE_REVALIDATE_SECS", "86400")?;
    let cms_timeout_secs = parse_u64("VITRINE_CMS_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        cms_api_url,
        cms_access_token,
        bind_addr,
        log_level,
        render_strategy,
        listing_page_size,
        prebuild_page_size,
        revalidate_secs,
        cms_timeout_secs,
    })
}

/// Parse a string into a `RenderStrategy` variant.
///
/// Unrecognized values are rejected rather than defaulted: a typo here would
/// silently change the caching semantics of every detail page.
fn parse_render_strategy(s: &str) -> Result<RenderStrategy, ConfigError> {
    match s {
        "on-request" => Ok(RenderStrategy::OnRequest),
        "blocking-fallback" => Ok(RenderStrategy::BlockingFallback),
        "revalidate" => Ok(RenderStrategy::Revalidate),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_RENDER_STRATEGY".to_string(),
            reason: format!(
                "unknown strategy {other:?}, expected on-request | blocking-fallback | revalidate"
            ),
        }),
    }
}
