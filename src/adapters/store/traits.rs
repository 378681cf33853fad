//! Persistence store abstraction
//!
//! This module defines the trait that store backends must implement to hold
//! the patient table.

use crate::domain::{PatientTable, Result};
use async_trait::async_trait;

/// Whole-document persistence for the patient table
///
/// A store offers exactly two operations: read the entire table and
/// overwrite the entire table. Callers load before every operation and save
/// after every mutation; implementations provide no locking, transactions or
/// partial updates.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Load the full table
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RegistryError::Storage`] if the backing
    /// document cannot be read or parsed.
    async fn load(&self) -> Result<PatientTable>;

    /// Overwrite the full table
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RegistryError::Storage`] if the document
    /// cannot be written.
    async fn save(&self, table: &PatientTable) -> Result<()>;

    /// Short backend name used in logs
    fn backend_name(&self) -> &'static str;
}
