//! Query operations over the patient table
//!
//! This module provides the sort engine used by the sorted listing.

pub mod sort;

pub use sort::{sort_records, SortField, SortOrder, SortQuery, SORT_KEY_ACCESSORS};
