//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{RegistryConfig, StoreBackend};
use crate::domain::errors::RegistryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RegistryConfig
/// 4. Applies environment variable overrides (REGISTRY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use patient_registry::config::loader::load_config;
///
/// let config = load_config("registry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RegistryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RegistryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RegistryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RegistryConfig = toml::from_str(&contents)
        .map_err(|e| RegistryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads configuration from `path` if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way, so a registry can
/// be run with no file at all.
///
/// # Errors
///
/// Returns an error if the file exists but is invalid, or if the effective
/// configuration fails validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<RegistryConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        finish(RegistryConfig::default())
    }
}

fn finish(mut config: RegistryConfig) -> Result<RegistryConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RegistryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RegistryError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RegistryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the REGISTRY_* prefix
///
/// Variables follow the pattern `REGISTRY_<SECTION>_<KEY>`, for example
/// `REGISTRY_SERVER_PORT` or `REGISTRY_STORE_PATH`.
///
/// # Errors
///
/// Returns an error if an override holds a value that cannot be parsed
fn apply_env_overrides(config: &mut RegistryConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("REGISTRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("REGISTRY_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("REGISTRY_SERVER_PORT") {
        config.server.port = parse_override("REGISTRY_SERVER_PORT", &val)?;
    }
    if let Ok(val) = std::env::var("REGISTRY_SERVER_SHUTDOWN_TIMEOUT_SECS") {
        config.server.shutdown_timeout_secs =
            parse_override("REGISTRY_SERVER_SHUTDOWN_TIMEOUT_SECS", &val)?;
    }

    // Store overrides
    if let Ok(val) = std::env::var("REGISTRY_STORE_BACKEND") {
        config.store.backend = match val.to_lowercase().as_str() {
            "json" => StoreBackend::Json,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(RegistryError::Configuration(format!(
                    "Invalid REGISTRY_STORE_BACKEND '{}'. Must be one of: json, memory",
                    other
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("REGISTRY_STORE_PATH") {
        config.store.path = val;
    }
    if let Ok(val) = std::env::var("REGISTRY_STORE_PRETTY") {
        config.store.pretty = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("REGISTRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("REGISTRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("REGISTRY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        RegistryError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}
