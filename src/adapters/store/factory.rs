//! Store factory
//!
//! This module creates the configured store backend.

use crate::adapters::store::json_file::JsonFileStore;
use crate::adapters::store::memory::MemoryStore;
use crate::adapters::store::traits::PatientStore;
use crate::config::schema::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Create a store based on the configuration
///
/// # Arguments
///
/// * `config` - The store section of the registry configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements PatientStore
pub fn create_store(config: &StoreConfig) -> Arc<dyn PatientStore> {
    match config.backend {
        StoreBackend::Json => {
            tracing::info!(path = %config.path, pretty = config.pretty, "Using JSON file store");
            Arc::new(JsonFileStore::new(&config.path).with_pretty(config.pretty))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    }
}
