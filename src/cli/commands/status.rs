//! Status command implementation
//!
//! This module implements the `status` command for displaying how many
//! patients the store holds and how they spread over the verdict bands.

use crate::adapters::store::create_store;
use crate::config::load_config_or_default;
use crate::core::registry::PatientRegistry;
use crate::domain::Verdict;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking registry status");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };

        let registry = PatientRegistry::new(create_store(&config.store));
        let summary = match registry.summary().await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to load patients");
                println!("   Error: {}", e);
                return Ok(5); // Fatal error exit code
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(0);
        }

        println!("📊 Registry Status");
        println!();
        println!("  Store: {} ({})", registry.backend_name(), config.store.path);
        println!("  Patients: {}", summary.total);

        if summary.total == 0 {
            println!();
            println!("No patients stored yet.");
            return Ok(0);
        }

        println!();
        for verdict in Verdict::ALL {
            println!("  {:<12} {}", verdict.as_str(), summary.count(verdict));
        }
        if summary.unclassified > 0 {
            println!("  {:<12} {}", "Unclassified", summary.unclassified);
        }
        println!();
        Ok(0)
    }
}
