//! Adapters for external systems
//!
//! This module contains the persistence backends the registry can run on.

pub mod store;
