//! Core business logic for the patient registry.
//!
//! - [`query`] - Sort engine over materialized records
//! - [`registry`] - Store-backed list/lookup/sort/create operations

pub mod query;
pub mod registry;
