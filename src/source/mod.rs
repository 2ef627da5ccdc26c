//! Validator export retrieval.
//!
//! This module handles reading the RPKI validator's JSON export:
//! - [`cache`] - Selecting and reading the cache source (HTTP or local file)
//! - [`export`] - The export document and its parsing

mod cache;
mod export;

// Re-export public types and functions
pub use cache::{read_validator_export, CacheSource};
pub use export::{parse_export, ValidatorExport};
