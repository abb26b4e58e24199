//! Adopt-a-Pet import configuration.
//!
//! The partner intake system describes its bulk-import schema in a small
//! line-oriented configuration file (`import.cfg`). Each column of the
//! import is declared by a header line and optionally followed by
//! shelter-value to target-value mappings. This crate parses that file
//! into an immutable [`MappingTable`] which fixes the output field order
//! and answers value-translation queries for the normalizers.

pub mod error;
pub mod mapping;

pub use error::{Error, Result};
pub use mapping::MappingTable;
