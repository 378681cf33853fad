//! Patient registry service
//!
//! [`PatientRegistry`] is where the store, the record model and the sort
//! engine meet. Every operation loads the full table from the store; the
//! create operation writes the full table back. Nothing is cached between
//! calls.

use crate::adapters::store::PatientStore;
use crate::core::query::SortQuery;
use crate::domain::{
    MaterializedRecord, Patient, PatientId, PatientTable, RegistryError, Result, Verdict,
};
use crate::log_patient_created;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Message returned when a lookup misses
pub const PATIENT_NOT_FOUND: &str = "Patient not found";

/// Record counts for the `status` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    /// Number of stored records
    pub total: usize,
    pub underweight: usize,
    pub normal: usize,
    pub overweight: usize,
    pub obese: usize,
    /// Records whose height/weight could not produce a BMI
    pub unclassified: usize,
}

impl RegistrySummary {
    /// Count for one verdict band
    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Underweight => self.underweight,
            Verdict::Normal => self.normal,
            Verdict::Overweight => self.overweight,
            Verdict::Obese => self.obese,
        }
    }

    fn record(&mut self, verdict: Option<Verdict>) {
        self.total += 1;
        match verdict {
            Some(Verdict::Underweight) => self.underweight += 1,
            Some(Verdict::Normal) => self.normal += 1,
            Some(Verdict::Overweight) => self.overweight += 1,
            Some(Verdict::Obese) => self.obese += 1,
            None => self.unclassified += 1,
        }
    }
}

/// Read/sort/create operations over a patient store
#[derive(Clone)]
pub struct PatientRegistry {
    store: Arc<dyn PatientStore>,
}

impl PatientRegistry {
    /// Create a registry over `store`
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// The full store contents, unmodified
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn list_all(&self) -> Result<PatientTable> {
        self.store.load().await
    }

    /// One record with its id and derived fields
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record is stored under `id`.
    pub async fn get_by_id(&self, id: &str) -> Result<MaterializedRecord> {
        let table = self.store.load().await?;
        table.materialize(id).ok_or_else(|| {
            tracing::debug!(patient_id = %id, "Patient lookup missed");
            RegistryError::NotFound(PATIENT_NOT_FOUND.to_string())
        })
    }

    /// Every record, materialized and ordered by `query`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn sort(&self, query: SortQuery) -> Result<Vec<MaterializedRecord>> {
        let table = self.store.load().await?;
        let sorted = query.apply(table.materialize_all());
        tracing::debug!(
            sort_by = %query.field,
            order = %query.order,
            count = sorted.len(),
            "Sorted patients"
        );
        Ok(sorted)
    }

    /// Parses raw `sort_by`/`order` parameters, then sorts
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParameter`] before touching the store
    /// if either parameter is invalid.
    pub async fn sort_by(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<MaterializedRecord>> {
        let query = SortQuery::parse(sort_by, order)?;
        self.sort(query).await
    }

    /// Validates `candidate` and stores it under its id
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if any field breaks its constraint
    /// - [`RegistryError::AlreadyExists`] if the id is already stored; the
    ///   store is not written
    /// - [`RegistryError::Storage`] if the store cannot be read or written
    pub async fn create(&self, candidate: &Value) -> Result<PatientId> {
        let patient = Patient::from_json(candidate)?;
        self.insert(patient).await
    }

    /// Stores an already-validated patient under its id
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`], minus validation.
    pub async fn insert(&self, patient: Patient) -> Result<PatientId> {
        let id = patient.id().clone();
        let verdict = patient.verdict();

        let mut table = self.store.load().await?;
        if table.contains(&id) {
            tracing::info!(patient_id = %id, "Rejected create for existing patient");
            return Err(RegistryError::AlreadyExists(
                "patient already exists".to_string(),
            ));
        }
        table.insert(patient)?;
        self.store.save(&table).await?;

        log_patient_created!(&id, verdict);
        Ok(id)
    }

    /// Record counts per verdict band
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn summary(&self) -> Result<RegistrySummary> {
        let table = self.store.load().await?;
        let mut summary = RegistrySummary::default();
        for record in table.materialize_all() {
            summary.record(record.verdict());
        }
        Ok(summary)
    }

    /// Name of the underlying store backend
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}
