use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PROOFSTUDIO_ENV", "development"));
    let bind_addr = parse_addr("PROOFSTUDIO_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PROOFSTUDIO_LOG_LEVEL", "info");

    // An empty string counts as unset so a blank line in .env does not
    // masquerade as a credential.
    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let gemini_model = or_default("PROOFSTUDIO_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_timeout_secs = parse_u64("PROOFSTUDIO_GEMINI_TIMEOUT_SECS", "60")?;
    let target_locale = or_default("PROOFSTUDIO_TARGET_LOCALE", "es-MX");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_timeout_secs,
        target_locale,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
