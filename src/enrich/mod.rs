//! Enrichment orchestration: identifiers in, joined rows out.
//!
//! The [`Enricher`] walks an [`IdentifierColumn`] in order. For each present
//! identifier it extracts the identity, then the works, and cross-joins them
//! into [`OutputRow`]s. An identifier whose profile is unavailable, or that
//! has no works, contributes no rows.
//!
//! # Concurrency Model
//!
//! - Identifiers are processed through an ordered buffered stream on the
//!   calling task; `concurrency = 1` is strictly sequential
//! - Output order always follows input order regardless of completion order
//! - Progress is driven by an atomic counter bumped when each cell finishes
//! - Failures are per-identifier and never abort the batch
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use orcid_enricher_core::enrich::{Enricher, IdentifierColumn, NoProgress};
//! use orcid_enricher_core::orcid::{HttpSettings, OrcidClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(OrcidClient::new(&HttpSettings::default())?);
//! let enricher = Enricher::new(client, 1)?;
//! let column = IdentifierColumn::from_cells([Some("0000-0002-1825-0097")]);
//! let outcome = enricher.run(&column, &NoProgress).await;
//! println!("{} rows", outcome.rows.len());
//! # Ok(())
//! # }
//! ```

mod progress;

pub use progress::{NoProgress, ProgressSink, progress_fraction};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info};

use crate::extract::{IdentityRecord, WorkRecord, extract_identity, extract_works};
use crate::orcid::RegistrySource;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 32;

/// Default concurrency: one identifier at a time.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Error type for enricher construction.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Ordered input cells of the identifier column.
///
/// Blank cells are kept (as `None`) so progress can count every input row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierColumn {
    cells: Vec<Option<String>>,
}

impl IdentifierColumn {
    /// Builds a column from raw cell values.
    ///
    /// Values are trimmed; empty or whitespace-only cells become blank.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let cells = cells
            .into_iter()
            .map(|cell| {
                cell.map(|value| value.as_ref().trim().to_string())
                    .filter(|value| !value.is_empty())
            })
            .collect();
        Self { cells }
    }

    /// All cells in input order.
    #[must_use]
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Number of cells, blanks included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    /// Number of non-blank cells.
    #[must_use]
    pub fn present(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns true if the column has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One output row: a work joined with its researcher's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    /// Work title.
    pub title: Option<String>,
    /// Work type.
    pub work_type: Option<String>,
    /// Publication year.
    pub year: Option<String>,
    /// Selected DOI.
    pub doi: Option<String>,
    /// Identifier the row belongs to.
    pub orcid: String,
    /// Researcher given name.
    pub given_name: Option<String>,
    /// Researcher family name.
    pub family_name: Option<String>,
    /// Researcher country.
    pub country: Option<String>,
}

impl OutputRow {
    /// Merges a work with the identity that owns it.
    #[must_use]
    pub fn new(identity: &IdentityRecord, work: WorkRecord) -> Self {
        Self {
            title: work.title,
            work_type: work.work_type,
            year: work.year,
            doi: work.doi,
            orcid: identity.identifier.clone(),
            given_name: identity.given_name.clone(),
            family_name: identity.family_name.clone(),
            country: identity.country.clone(),
        }
    }
}

/// Cross-joins one identity with its works, preserving work order.
#[must_use]
pub fn join_rows(identity: &IdentityRecord, works: Vec<WorkRecord>) -> Vec<OutputRow> {
    works
        .into_iter()
        .map(|work| OutputRow::new(identity, work))
        .collect()
}

/// Counters for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    /// Cells handled, blanks included.
    pub cells: usize,
    /// Blank cells skipped.
    pub blank: usize,
    /// Identifiers whose profile was unavailable.
    pub identities_missing: usize,
    /// Identifiers with a profile.
    pub identities_found: usize,
    /// Identifiers with a profile but no works.
    pub without_works: usize,
    /// Rows produced.
    pub rows: usize,
}

/// Result of [`Enricher::run`].
#[derive(Debug, Clone, Default)]
pub struct EnrichOutcome {
    /// Rows in input order, then group order, then summary order.
    pub rows: Vec<OutputRow>,
    /// Run counters.
    pub stats: EnrichStats,
}

enum CellOutcome {
    Blank,
    IdentityMissing,
    Enriched(Vec<OutputRow>),
}

/// Drives extraction and joining over an identifier column.
pub struct Enricher {
    source: Arc<dyn RegistrySource>,
    concurrency: usize,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl Enricher {
    /// Creates an enricher over `source` processing up to `concurrency`
    /// identifiers at once.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-32).
    pub fn new(source: Arc<dyn RegistrySource>, concurrency: usize) -> Result<Self, EnrichError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EnrichError::InvalidConcurrency { value: concurrency });
        }
        Ok(Self {
            source,
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Processes every cell of `column`, reporting progress to `progress`.
    ///
    /// Never fails: per-identifier problems only reduce the row count.
    #[tracing::instrument(skip_all, fields(cells = column.total(), concurrency = self.concurrency))]
    pub async fn run(&self, column: &IdentifierColumn, progress: &dyn ProgressSink) -> EnrichOutcome {
        let total = column.total();
        let completed = AtomicUsize::new(0);
        let completed = &completed;

        let outcomes: Vec<CellOutcome> = stream::iter(column.cells())
            .map(|cell| async move {
                let outcome = self.process_cell(cell.as_deref()).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress.update(done, total);
                outcome
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut result = EnrichOutcome::default();
        for outcome in outcomes {
            result.stats.cells += 1;
            match outcome {
                CellOutcome::Blank => result.stats.blank += 1,
                CellOutcome::IdentityMissing => result.stats.identities_missing += 1,
                CellOutcome::Enriched(rows) => {
                    result.stats.identities_found += 1;
                    if rows.is_empty() {
                        result.stats.without_works += 1;
                    }
                    result.rows.extend(rows);
                }
            }
        }
        result.stats.rows = result.rows.len();

        info!(
            cells = result.stats.cells,
            blank = result.stats.blank,
            identities_found = result.stats.identities_found,
            identities_missing = result.stats.identities_missing,
            rows = result.stats.rows,
            "Enrichment finished"
        );
        result
    }

    async fn process_cell(&self, cell: Option<&str>) -> CellOutcome {
        let Some(identifier) = cell else {
            debug!("Skipping blank identifier cell");
            return CellOutcome::Blank;
        };

        let Some(identity) = extract_identity(self.source.as_ref(), identifier).await else {
            return CellOutcome::IdentityMissing;
        };

        let works = extract_works(self.source.as_ref(), identifier).await;
        debug!(orcid = %identifier, works = works.len(), "Joined identity with works");
        CellOutcome::Enriched(join_rows(&identity, works))
    }
}
