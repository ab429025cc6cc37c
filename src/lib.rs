//! ORCID Enricher Core Library
//!
//! This library provides the core functionality for the orcid-enricher tool,
//! which turns a list of ORCID iDs into a flat table of researchers and
//! their works, fetched from the public ORCID registry.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`orcid`] - Registry HTTP client and safe JSON navigation
//! - [`extract`] - Profile and works normalization into flat records
//! - [`enrich`] - Orchestration, row joining and progress reporting
//! - [`table`] - CSV input of identifiers and output of enriched rows

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod enrich;
pub mod extract;
pub mod orcid;
pub mod table;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use enrich::{
    DEFAULT_CONCURRENCY, EnrichError, EnrichOutcome, EnrichStats, Enricher, IdentifierColumn,
    MAX_CONCURRENCY, NoProgress, OutputRow, ProgressSink, join_rows, progress_fraction,
};
pub use extract::{IdentityRecord, WorkRecord, extract_identity, extract_works};
pub use orcid::{DEFAULT_BASE_URL, FetchError, HttpSettings, OrcidClient, RegistrySource, Resource};
pub use table::{
    DEFAULT_OUTPUT_FILE, IDENTIFIER_COLUMN, OUTPUT_COLUMNS, TableError, read_identifiers,
    write_rows,
};
