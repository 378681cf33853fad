//! In-memory store
//!
//! Keeps the table in process. Used by tests and by `backend = "memory"`
//! for throwaway runs; nothing survives a restart.

use super::traits::PatientStore;
use crate::domain::{PatientTable, RegistryError, Result};
use crate::log_store_operation;
use async_trait::async_trait;
use std::sync::RwLock;

/// Store that holds the table in memory
///
/// `load` hands out a copy, so callers still work on a snapshot exactly as
/// they would with the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<PatientTable>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `table`
    pub fn with_table(table: PatientTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn load(&self) -> Result<PatientTable> {
        let table = self
            .table
            .read()
            .map_err(|_| RegistryError::Storage("memory store lock poisoned".to_string()))?
            .clone();
        log_store_operation!("load", self.backend_name(), table.len());
        Ok(table)
    }

    async fn save(&self, table: &PatientTable) -> Result<()> {
        let mut guard = self
            .table
            .write()
            .map_err(|_| RegistryError::Storage("memory store lock poisoned".to_string()))?;
        *guard = table.clone();
        log_store_operation!("save", self.backend_name(), table.len());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Patient};
    use serde_json::json;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_table() {
        let seeded = PatientTable::from(json!({"P001": {}}).as_object().unwrap().clone());
        let store = MemoryStore::with_table(seeded);

        let replacement = PatientTable::from(json!({"P009": {}}).as_object().unwrap().clone());
        store.save(&replacement).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, replacement);
        assert!(loaded.get("P001").is_none());
    }

    #[tokio::test]
    async fn test_load_returns_snapshot() {
        let store = MemoryStore::new();
        let mut snapshot = store.load().await.unwrap();
        let patient = Patient::builder()
            .id("P001")
            .name("Ravi")
            .city("Pune")
            .age(30)
            .gender(Gender::Male)
            .height(1.8)
            .weight(72.0)
            .build()
            .unwrap();
        snapshot.insert(patient).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(store.load().await.unwrap().is_empty());
    }
}
