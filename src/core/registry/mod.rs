//! Registry operations
//!
//! This module provides the service that backs every HTTP endpoint and CLI
//! command.

pub mod service;

pub use service::{PatientRegistry, RegistrySummary, PATIENT_NOT_FOUND};
