use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("HSL_ENV", "development"))?;
    let bind_addr = parse_addr("HSL_BIND_ADDR", "0.0.0.0:8013")?;
    let log_level = or_default("HSL_LOG_LEVEL", "info");
    let classifier_path = PathBuf::from(or_default("HSL_CLASSIFIER_PATH", "./models/svm.json"));
    let embedding_model = or_default(
        "HSL_EMBEDDING_MODEL",
        "sentence-transformers/all-MiniLM-L6-v2",
    );
    let tei_url = or_default("HSL_TEI_URL", "http://localhost:8080");
    let embed_timeout_secs = parse_u64("HSL_EMBED_TIMEOUT_SECS", "30")?;
    let embed_batch_size = parse_usize("HSL_EMBED_BATCH_SIZE", "64")?;

    if embedding_model.trim().is_empty() {
        return Err(invalid("HSL_EMBEDDING_MODEL", "must not be empty".into()));
    }
    if embed_batch_size == 0 {
        return Err(invalid("HSL_EMBED_BATCH_SIZE", "must be at least 1".into()));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        classifier_path,
        embedding_model,
        tei_url,
        embed_timeout_secs,
        embed_batch_size,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HSL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
