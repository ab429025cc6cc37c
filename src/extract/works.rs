//! Works extraction: `works` resource to [`WorkRecord`]s.

use serde_json::Value;
use tracing::{debug, warn};

use crate::orcid::json::{array_at, lookup, text_at};
use crate::orcid::{RegistrySource, Resource};

/// External identifier type that marks a DOI entry.
const DOI_ID_TYPE: &str = "doi";

/// Flat description of one work summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkRecord {
    /// `title.title.value`
    pub title: Option<String>,
    /// Declared work type, verbatim (e.g. `journal-article`).
    pub work_type: Option<String>,
    /// `publication-date.year.value`
    pub year: Option<String>,
    /// Value of the last `doi` external identifier.
    pub doi: Option<String>,
}

/// Fetches and normalizes the works listing for `identifier`.
///
/// Never fails the caller: an unavailable listing yields no works.
#[tracing::instrument(skip_all, fields(orcid = %identifier))]
pub async fn extract_works(source: &dyn RegistrySource, identifier: &str) -> Vec<WorkRecord> {
    match source.fetch(identifier, Resource::Works).await {
        Ok(listing) => {
            let works = works_from_listing(&listing);
            debug!(works = works.len(), "Extracted works");
            works
        }
        Err(error) if error.is_transport() => {
            warn!(error = %error, "Works unavailable; continuing with none");
            Vec::new()
        }
        Err(error) => {
            debug!(error = %error, "Works unavailable; continuing with none");
            Vec::new()
        }
    }
}

/// Flattens `group[*].work-summary[*]` into one record per summary.
///
/// Groups are the registry's own merge of duplicate records; no further
/// deduplication happens here, so one logical work may yield several records.
#[must_use]
pub fn works_from_listing(listing: &Value) -> Vec<WorkRecord> {
    array_at(listing, &["group"])
        .iter()
        .flat_map(|group| array_at(group, &["work-summary"]))
        .map(work_from_summary)
        .collect()
}

/// Normalizes a single work summary.
#[must_use]
pub fn work_from_summary(summary: &Value) -> WorkRecord {
    WorkRecord {
        title: text_at(summary, &["title", "title", "value"]),
        work_type: text_at(summary, &["type"]),
        year: text_at(summary, &["publication-date", "year", "value"]),
        doi: select_doi(summary),
    }
}

/// Picks the DOI from a summary's external identifiers.
///
/// Scans every entry; when several are typed `doi`, the last one wins.
#[must_use]
pub fn select_doi(summary: &Value) -> Option<String> {
    let mut doi = None;
    for external_id in array_at(summary, &["external-ids", "external-id"]) {
        let is_doi = lookup(external_id, &["external-id-type"])
            .and_then(Value::as_str)
            .is_some_and(|id_type| id_type == DOI_ID_TYPE);
        if is_doi {
            doi = text_at(external_id, &["external-id-value"]);
        }
    }
    doi
}
