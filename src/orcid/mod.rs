//! Access to the public ORCID registry API.
//!
//! # Architecture
//!
//! - [`RegistrySource`] - Async trait the extractors fetch through
//! - [`OrcidClient`] - reqwest-backed implementation against `pub.orcid.org`
//! - [`Resource`] - The two per-identifier resources this tool reads
//! - [`json`] - Safe-navigation helpers over loosely typed JSON
//!
//! # Example
//!
//! ```no_run
//! use orcid_enricher_core::orcid::{HttpSettings, OrcidClient, RegistrySource, Resource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OrcidClient::new(&HttpSettings::default())?;
//! let person = client.fetch("0000-0002-1825-0097", Resource::Person).await?;
//! println!("{person}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http_client;
pub mod json;

pub use client::OrcidClient;
pub use error::FetchError;
pub use http_client::HttpSettings;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// Default ORCID public API base URL.
pub const DEFAULT_BASE_URL: &str = "https://pub.orcid.org/v3.0";

/// A per-identifier registry resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Personal details: names, addresses.
    Person,
    /// Grouped work summaries.
    Works,
}

impl Resource {
    /// Returns the path segment appended after the identifier.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Works => "works",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Source of registry records.
///
/// Implementations return the parsed JSON body on a success status and a
/// [`FetchError`] for everything else. Callers decide how failures degrade.
///
/// # Object Safety
///
/// Uses `async_trait` so the orchestrator can hold a `dyn RegistrySource`.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetches one resource for one identifier.
    async fn fetch(&self, identifier: &str, resource: Resource) -> Result<Value, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_segments() {
        assert_eq!(Resource::Person.path_segment(), "person");
        assert_eq!(Resource::Works.path_segment(), "works");
    }

    #[test]
    fn test_resource_display_matches_path_segment() {
        assert_eq!(Resource::Person.to_string(), "person");
        assert_eq!(Resource::Works.to_string(), "works");
    }
}
