//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod serve;
pub mod status;
pub mod validate;
