//! Per-item outcome reporting for batch rating transitions.

use rankboard_core::{Error, RatingUpdate};

/// Report of a [`crate::RankingEngine::batch_update_ratings`] call: which
/// updates were applied, and which were skipped along with why.
///
/// Batch callers want best-effort speed; an update that would fail (e.g. a
/// ghost user no longer recorded at its claimed old rating) is skipped and
/// recorded here rather than aborting the whole batch. Previously applied
/// updates in the same batch are retained.
#[derive(Debug, Default, Clone)]
pub struct BatchUpdateReport {
    /// Updates applied to the histogram, in submission order.
    pub applied: Vec<RatingUpdate>,
    /// Updates skipped, paired with the reason they failed.
    pub failed: Vec<(RatingUpdate, Error)>,
}

impl BatchUpdateReport {
    /// Number of updates durably applied to the histogram.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// `true` if every submitted update applied cleanly.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}
