//! JSON file store
//!
//! Persists the patient table as a single JSON object keyed by patient id.

use super::traits::PatientStore;
use crate::domain::{PatientTable, RegistryError, Result};
use crate::log_store_operation;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Store backed by one JSON document on disk
///
/// Every `load` re-reads the file and every `save` rewrites it in full.
/// A file that does not exist yet loads as an empty table.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    /// Create a store for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Write indented JSON instead of the compact form
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PatientStore for JsonFileStore {
    async fn load(&self) -> Result<PatientTable> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Store file does not exist yet, starting empty"
                );
                return Ok(PatientTable::new());
            }
            Err(e) => {
                return Err(RegistryError::Storage(format!(
                    "Failed to read store file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let table: PatientTable = serde_json::from_slice(&contents).map_err(|e| {
            RegistryError::Storage(format!(
                "Failed to parse store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        log_store_operation!("load", self.backend_name(), table.len());
        Ok(table)
    }

    async fn save(&self, table: &PatientTable) -> Result<()> {
        let contents = if self.pretty {
            serde_json::to_vec_pretty(table)?
        } else {
            serde_json::to_vec(table)?
        };

        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            RegistryError::Storage(format!(
                "Failed to write store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        log_store_operation!("save", self.backend_name(), table.len());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "json"
    }
}
