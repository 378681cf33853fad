//! HTTP surface of the registry
//!
//! Maps each endpoint onto a [`PatientRegistry`](crate::core::registry::PatientRegistry)
//! operation and every [`RegistryError`](crate::domain::RegistryError) onto a
//! status code and a structured JSON body.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::registry_router;
