//! Progress bar for enrichment runs.

use indicatif::{ProgressBar, ProgressStyle};
use orcid_enricher_core::{ProgressSink, progress_fraction};
use tracing::trace;

/// Terminal progress bar fed by the enricher after each identifier.
///
/// When disabled the bar is hidden and updates only reach the trace log.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(enabled: bool, total: usize) -> Self {
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let bar = if enabled {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} identifiers [{elapsed_precise}]")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressSink for BarProgress {
    fn update(&self, completed: usize, total: usize) {
        self.bar.set_length(u64::try_from(total).unwrap_or(u64::MAX));
        self.bar
            .set_position(u64::try_from(completed).unwrap_or(u64::MAX));
        trace!(
            completed,
            total,
            fraction = progress_fraction(completed, total),
            "Progress"
        );
    }
}
