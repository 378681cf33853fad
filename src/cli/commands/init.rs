//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "registry.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing patient registry configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: patient-registry validate-config");
                println!("  3. Start the server: patient-registry serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn generate_config() -> &'static str {
        r#"# Patient Registry Configuration

[application]
log_level = "info"  # trace | debug | info | warn | error

[server]
host = "127.0.0.1"
port = 8000
# Seconds to wait for in-flight requests after SIGINT/SIGTERM
shutdown_timeout_secs = 30

[store]
backend = "json"  # json | memory
# Use ${VAR} to pull values from the environment, e.g. "${REGISTRY_DATA_DIR}/patients.json"
path = "patients.json"
pretty = false

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
    }
}
