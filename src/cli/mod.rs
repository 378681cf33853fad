//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the registry using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Patient Registry - patient record HTTP service
#[derive(Parser, Debug)]
#[command(name = "patient-registry")]
#[command(version, about, long_about = None)]
#[command(author = "Patient Registry Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "registry.toml", env = "REGISTRY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REGISTRY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show patient counts per verdict
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
