//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the registry configuration file.

use crate::config::load_config;
use crate::config::schema::StoreBackend;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates every section, so a loaded configuration
    /// is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: {}", config.server.bind_address());
        println!(
            "  Shutdown Timeout: {}s",
            config.server.shutdown_timeout_secs
        );
        match config.store.backend {
            StoreBackend::Json => {
                println!("  Store: json ({})", config.store.path);
                println!("  Pretty JSON: {}", config.store.pretty);
            }
            StoreBackend::Memory => println!("  Store: memory (not persisted)"),
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} (rotation: {})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(0)
    }
}
