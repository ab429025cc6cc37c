//! Profile extraction: `person` resource to [`IdentityRecord`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::orcid::json::{array_at, text_at};
use crate::orcid::{RegistrySource, Resource};

/// Flat identity of one researcher.
///
/// Every field except `identifier` is optional because upstream profiles
/// are populated at the registrant's discretion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// The identifier the profile was fetched for.
    pub identifier: String,
    /// `name.given-names.value`
    pub given_name: Option<String>,
    /// `name.family-name.value`
    pub family_name: Option<String>,
    /// `addresses.address[0].country.value`
    pub country: Option<String>,
}

impl IdentityRecord {
    /// Creates a record with no optional data.
    #[must_use]
    pub fn bare(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            given_name: None,
            family_name: None,
            country: None,
        }
    }
}

/// Fetches and normalizes the profile for `identifier`.
///
/// Returns `None` when the profile is unavailable for any reason (transport
/// failure, non-success status, unparseable body). Callers skip the
/// identifier in that case; it is not an error for the batch.
#[tracing::instrument(skip_all, fields(orcid = %identifier))]
pub async fn extract_identity(
    source: &dyn RegistrySource,
    identifier: &str,
) -> Option<IdentityRecord> {
    match source.fetch(identifier, Resource::Person).await {
        Ok(person) => Some(identity_from_person(identifier, &person)),
        Err(error) if error.is_transport() => {
            warn!(error = %error, "Profile unavailable; skipping identifier");
            None
        }
        Err(error) => {
            debug!(error = %error, "Profile unavailable; skipping identifier");
            None
        }
    }
}

/// Normalizes a parsed `person` document into an [`IdentityRecord`].
///
/// Only the first address entry is consulted for the country.
#[must_use]
pub fn identity_from_person(identifier: &str, person: &Value) -> IdentityRecord {
    let country = array_at(person, &["addresses", "address"])
        .first()
        .and_then(|address| text_at(address, &["country", "value"]));

    IdentityRecord {
        identifier: identifier.to_string(),
        given_name: text_at(person, &["name", "given-names", "value"]),
        family_name: text_at(person, &["name", "family-name", "value"]),
        country,
    }
}
