//! Persistence store layer
//!
//! This module provides a trait-based abstraction over the whole-document
//! patient store, with a JSON file backend and an in-memory backend.

pub mod factory;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::PatientStore;
