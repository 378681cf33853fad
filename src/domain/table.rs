//! The persisted patient table
//!
//! A [`PatientTable`] is the whole store: an ordered mapping from patient id
//! to that patient's stored fields. Values are kept as loosely-typed JSON so
//! the table round-trips whatever the document on disk contains, and lookups
//! tolerate records with missing or extra keys.

use super::errors::RegistryError;
use super::ids::PatientId;
use super::patient::Patient;
use super::result::Result;
use super::view::MaterializedRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whole-store snapshot, keyed by patient id in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientTable {
    entries: Map<String, Value>,
}

impl PatientTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a record is stored under `id`
    pub fn contains(&self, id: &PatientId) -> bool {
        self.entries.contains_key(id.as_str())
    }

    /// Stored fields for `id`, exactly as persisted
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Iterates `(id, stored fields)` in store order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts a validated patient under its id
    ///
    /// The id becomes the key; only the six stored fields are written as the
    /// value. Derived fields are never stored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] if the id is taken; the
    /// table is left unchanged.
    pub fn insert(&mut self, patient: Patient) -> Result<()> {
        if self.contains(patient.id()) {
            return Err(RegistryError::AlreadyExists(
                "patient already exists".to_string(),
            ));
        }

        let (id, record) = patient.into_parts();
        let fields = serde_json::to_value(record)?;
        self.entries.insert(id.into_inner(), fields);
        Ok(())
    }

    /// Materializes one record with its id and derived fields
    pub fn materialize(&self, id: &str) -> Option<MaterializedRecord> {
        self.entries
            .get(id)
            .map(|fields| MaterializedRecord::from_stored(id, fields))
    }

    /// Materializes every record, in store order
    pub fn materialize_all(&self) -> Vec<MaterializedRecord> {
        self.iter()
            .map(|(id, fields)| MaterializedRecord::from_stored(id, fields))
            .collect()
    }

    /// Raw JSON form of the whole table
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

impl From<Map<String, Value>> for PatientTable {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::Gender;
    use serde_json::json;

    fn patient(id: &str, weight: f64) -> Patient {
        Patient::builder()
            .id(id)
            .name("Test")
            .city("Pune")
            .age(30)
            .gender(Gender::Female)
            .height(1.6)
            .weight(weight)
            .build()
            .unwrap()
    }

    #[test]
    fn test_insert_stores_fields_without_id_or_derived() {
        let mut table = PatientTable::new();
        table.insert(patient("P001", 55.0)).unwrap();

        let stored = table.get("P001").unwrap();
        let keys: Vec<&str> = stored.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["name", "city", "age", "gender", "height", "weight"]);
    }

    #[test]
    fn test_insert_duplicate_rejected_and_table_unchanged() {
        let mut table = PatientTable::new();
        table.insert(patient("P001", 55.0)).unwrap();
        let before = table.clone();

        let err = table.insert(patient("P001", 99.0)).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));
        assert_eq!(table, before);
    }

    #[test]
    fn test_preserves_document_order() {
        let table: PatientTable =
            serde_json::from_str(r#"{"P003": {}, "P001": {}, "P002": {}}"#).unwrap();
        let ids: Vec<&str> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["P003", "P001", "P002"]);

        let mut table = table;
        table.insert(patient("P000", 60.0)).unwrap();
        let ids: Vec<&str> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["P003", "P001", "P002", "P000"]);
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let mut table = PatientTable::new();
        table.insert(patient("P001", 55.0)).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["P001"]["gender"], "female");
        assert!(json["P001"].get("bmi").is_none());
    }

    #[test]
    fn test_materialize_missing_id() {
        let table = PatientTable::from(json!({"P001": {}}).as_object().unwrap().clone());
        assert!(table.materialize("P002").is_none());
        assert!(table.materialize("P001").is_some());
        assert_eq!(table.materialize_all().len(), 1);
    }
}
