//! Downstream consumers of compensated samples.

use crate::compensate::CompensatedSample;

/// Receives the compensated sample once per controller iteration.
///
/// Communication and logging past compensation live behind this trait.
pub trait SampleSink {
    /// Accept the current compensated sample.
    fn accept(&mut self, sample: &CompensatedSample);
}

/// Discards every sample.
impl SampleSink for () {
    #[inline]
    fn accept(&mut self, _sample: &CompensatedSample) {}
}

impl<F: FnMut(&CompensatedSample)> SampleSink for F {
    #[inline]
    fn accept(&mut self, sample: &CompensatedSample) {
        self(sample);
    }
}

/// Keeps the most recent sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestSample {
    latest: Option<CompensatedSample>,
    accepted: u64,
}

impl LatestSample {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: None,
            accepted: 0,
        }
    }

    /// Most recent sample, if any.
    #[must_use]
    pub fn get(&self) -> Option<CompensatedSample> {
        self.latest
    }

    /// Samples accepted so far.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }
}

impl SampleSink for LatestSample {
    fn accept(&mut self, sample: &CompensatedSample) {
        self.latest = Some(*sample);
        self.accepted = self.accepted.saturating_add(1);
    }
}
