//! Domain models and types for the patient registry.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`])
//! - **The validated record model** ([`Patient`], [`PatientRecord`], [`Gender`])
//! - **Derived fields** ([`bmi::body_mass_index`], [`Verdict`])
//! - **The store snapshot** ([`PatientTable`]) and client views ([`MaterializedRecord`])
//! - **Error types** ([`RegistryError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Validation
//!
//! Candidates are validated in one pass and every violation is reported:
//!
//! ```rust
//! use patient_registry::domain::Patient;
//! use serde_json::json;
//!
//! let err = Patient::from_json(&json!({"id": "P001", "age": 0})).unwrap_err();
//! assert!(err.has_field("name"));
//! assert!(err.has_field("age"));
//! ```

pub mod bmi;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;
pub mod table;
pub mod view;

// Re-export commonly used types for convenience
pub use bmi::Verdict;
pub use errors::{FieldViolation, RegistryError, ValidationError, ViolationRule};
pub use ids::PatientId;
pub use patient::{Gender, Patient, PatientBuilder, PatientRecord};
pub use result::Result;
pub use table::PatientTable;
pub use view::MaterializedRecord;
