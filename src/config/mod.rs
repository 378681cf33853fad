//! Configuration management for the registry.
//!
//! Configuration lives in a TOML file (`registry.toml` by default) with
//! support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `REGISTRY_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use patient_registry::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("registry.toml")?;
//! println!("Listening on {}", config.server.bind_address());
//! println!("Store: {:?} at {}", config.store.backend, config.store.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Bind address and shutdown timeout
//! - [`StoreConfig`] - Persistence backend and document path
//! - [`LoggingConfig`] - Optional rotating JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [store]
//! backend = "json"
//! path = "${REGISTRY_DATA_DIR}/patients.json"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, LoggingConfig, RegistryConfig, ServerConfig, StoreBackend, StoreConfig,
};
