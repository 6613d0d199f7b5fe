//! The shared latest-sample slot.

use crate::sample::{RawSample, SAMPLE_BITS};
use portable_atomic::{AtomicU64, Ordering};

/// Available flag, stored above the 56 sample bits.
const AVAILABLE: u64 = 1 << 56;

/// Single-slot hand-off between the sampler interrupt and the background loop.
///
/// The slot holds exactly one [`RawSample`] plus an *available* flag. The
/// producer overwrites it every tick; the consumer reads it and clears the
/// flag. There is no queue: a sample that is never consumed is replaced by the
/// next one and the replacement is reported by the caller as an overrun.
///
/// Sample and flag share one 64-bit atomic word, so a reader never observes a
/// torn sample and the publish/overrun check is a single swap. `portable-atomic`
/// supplies the 64-bit operations on cores without native 64-bit atomics.
///
/// A slot is owned by a [`SampleSource`](crate::SampleSource); consuming it is
/// only possible through the source's
/// [`critical_section`](crate::SampleSource::critical_section).
///
/// # Example
///
/// ```rust
/// use airdata_acquisition::{RawSample, SampleSlot};
///
/// let slot = SampleSlot::new();
///
/// assert!(!slot.publish(RawSample::new(0, 20, 300)));
/// assert!(slot.publish(RawSample::new(0, 21, 301)));
/// assert_eq!(slot.peek(), RawSample::new(0, 21, 301));
/// assert!(slot.is_available());
/// ```
#[derive(Debug)]
pub struct SampleSlot {
    word: AtomicU64,
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSlot {
    /// Create a slot holding [`RawSample::POWER_ON`], marked consumed.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_sample(RawSample::POWER_ON, false)
    }

    /// Create a slot holding `sample` with the given availability.
    #[must_use]
    pub const fn with_sample(sample: RawSample, available: bool) -> Self {
        let flag = if available { AVAILABLE } else { 0 };
        Self {
            word: AtomicU64::new(sample.pack() | flag),
        }
    }

    /// Producer side: store `sample` and mark it available.
    ///
    /// Returns `true` if the previous sample was still available, i.e. the
    /// consumer missed it. The new sample is stored either way.
    ///
    /// # RT Safety
    ///
    /// One atomic swap.
    #[inline]
    pub fn publish(&self, sample: RawSample) -> bool {
        let previous = self.word.swap(sample.pack() | AVAILABLE, Ordering::AcqRel);
        previous & AVAILABLE != 0
    }

    /// Consumer side: read the current sample and mark it consumed.
    ///
    /// Returns the current content whether or not it was available; freshness
    /// is tracked for overrun detection only.
    #[inline]
    pub(crate) fn take(&self) -> RawSample {
        let word = self.word.fetch_and(!AVAILABLE, Ordering::AcqRel);
        RawSample::unpack(word & SAMPLE_BITS)
    }

    /// Current content without touching the flag.
    #[must_use]
    pub fn peek(&self) -> RawSample {
        RawSample::unpack(self.word.load(Ordering::Acquire))
    }

    /// True if the current sample has not been consumed yet.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.word.load(Ordering::Acquire) & AVAILABLE != 0
    }
}
