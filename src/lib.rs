// Patient Registry - Patient record HTTP service
// Copyright (c) 2025 Patient Registry Contributors
// Licensed under the MIT License

//! # Patient Registry
//!
//! A small HTTP service that keeps patient records in a single JSON document,
//! derives each patient's body-mass index and weight category on read, and
//! serves sorted listings.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP routes, handlers and error mapping
//! - [`core`] - Registry operations and the sort engine
//! - [`adapters`] - Persistence backends (JSON file, in-memory)
//! - [`domain`] - Record model, validation, derived fields and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use patient_registry::adapters::store::JsonFileStore;
//! use patient_registry::core::registry::PatientRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = PatientRegistry::new(Arc::new(JsonFileStore::new("patients.json")));
//!
//!     let record = registry.get_by_id("P001").await?;
//!     println!("{} has BMI {:?}", record.id(), record.bmi());
//!
//!     for record in registry.sort_by(Some("weight"), Some("desc")).await? {
//!         println!("{}: {:?}", record.id(), record.number("weight"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Serving
//!
//! ```rust,no_run
//! use patient_registry::adapters::store::MemoryStore;
//! use patient_registry::api::registry_router;
//! use patient_registry::core::registry::PatientRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = registry_router(PatientRegistry::new(Arc::new(MemoryStore::new())));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::RegistryError`]. Validation failures carry one
//! [`domain::FieldViolation`] per offending field.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
