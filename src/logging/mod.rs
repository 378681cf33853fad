//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//! - Helper macros for the registry's recurring log events
//!
//! # Example
//!
//! ```no_run
//! use patient_registry::logging::init_logging;
//! use patient_registry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a newly created patient
///
/// # Example
///
/// ```no_run
/// use patient_registry::log_patient_created;
/// use patient_registry::domain::{PatientId, Verdict};
///
/// let id = PatientId::new("P001").unwrap();
/// log_patient_created!(&id, Verdict::Normal);
/// ```
#[macro_export]
macro_rules! log_patient_created {
    ($patient_id:expr, $verdict:expr) => {
        tracing::info!(
            patient_id = %$patient_id,
            verdict = %$verdict,
            "Patient created"
        );
    };
}

/// Log a whole-document store read or write
///
/// # Example
///
/// ```no_run
/// use patient_registry::log_store_operation;
///
/// log_store_operation!("load", "json", 42);
/// ```
#[macro_export]
macro_rules! log_store_operation {
    ($operation:expr, $backend:expr, $count:expr) => {
        tracing::debug!(
            operation = $operation,
            backend = $backend,
            records = $count,
            "Store operation"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use patient_registry::log_error_with_context;
/// use patient_registry::domain::RegistryError;
///
/// let error = RegistryError::Storage("disk full".to_string());
/// log_error_with_context!(&error, "Failed to save patients");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
