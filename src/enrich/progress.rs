//! Progress reporting seam for enrichment runs.

/// Receives progress after each input cell is handled.
///
/// `completed` only ever increases during a run and ends at `total`, even
/// when identifiers finish out of order.
pub trait ProgressSink: Send + Sync {
    /// Called once per handled cell.
    fn update(&self, completed: usize, total: usize);
}

/// Discards progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _completed: usize, _total: usize) {}
}

/// Fractional progress in `0.0..=1.0`; an empty run counts as complete.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (completed.min(total) as f64) / (total as f64)
}
