//! Controller diagnostics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of the controller's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineStats {
    /// Completed iterations.
    pub iterations: u64,
    /// Filter passes that returned `FilterError`, tolerated or not.
    pub filter_errors: u64,
    /// `FilterError` reports sent to the fault sink.
    pub filter_escalations: u64,
    /// Compensation faults reported.
    pub compensation_faults: u64,
    /// Longest run of consecutive filter errors.
    pub longest_filter_streak: u32,
}

impl PipelineStats {
    /// Faults sent to the fault sink by the controller. Overruns are reported
    /// by the sample source and are not included.
    #[must_use]
    pub fn reported_faults(&self) -> u64 {
        self.filter_escalations
            .saturating_add(self.compensation_faults)
    }

    /// True if no fault has been reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.reported_faults() == 0
    }
}
