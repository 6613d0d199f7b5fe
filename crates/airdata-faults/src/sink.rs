//! The fault reporting boundary.
//!
//! [`FaultSink::report`] takes `&self` so that one sink can be shared between
//! the periodic sampler (interrupt context) and the background loop.

use crate::fault::{FaultCode, NO_FAULT};
use portable_atomic::{AtomicU8, AtomicU32, Ordering};

/// Receiver of escalated faults.
///
/// The pipeline calls [`report`](FaultSink::report) exactly once per escalation,
/// synchronously, before it continues. What happens next (equipment shutdown,
/// timestamping, persistent logging) belongs to the implementation.
///
/// # Real-Time Safety
///
/// Implementations called from the sampler must be bounded, non-blocking and
/// allocation-free. [`RecordingFaultSink`] meets those requirements.
pub trait FaultSink {
    /// Report one escalated fault.
    fn report(&self, code: FaultCode);
}

impl<S: FaultSink + ?Sized> FaultSink for &S {
    #[inline]
    fn report(&self, code: FaultCode) {
        (**self).report(code);
    }
}

#[cfg(feature = "std")]
impl<S: FaultSink + ?Sized> FaultSink for std::sync::Arc<S> {
    #[inline]
    fn report(&self, code: FaultCode) {
        (**self).report(code);
    }
}

/// Per-code fault counts returned by [`RecordingFaultSink::counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultCounts {
    /// Number of [`FaultCode::Overrun`] reports.
    pub overrun: u32,
    /// Number of [`FaultCode::FilterError`] reports.
    pub filter_error: u32,
    /// Number of [`FaultCode::CompensateDivideByZero`] reports.
    pub divide_by_zero: u32,
    /// Number of [`FaultCode::CompensateRangeOverflow`] reports.
    pub range_overflow: u32,
}

impl FaultCounts {
    /// Count for a single fault code.
    #[must_use]
    pub fn get(&self, code: FaultCode) -> u32 {
        match code {
            FaultCode::Overrun => self.overrun,
            FaultCode::FilterError => self.filter_error,
            FaultCode::CompensateDivideByZero => self.divide_by_zero,
            FaultCode::CompensateRangeOverflow => self.range_overflow,
        }
    }

    /// Sum over every fault code, saturating.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.overrun
            .saturating_add(self.filter_error)
            .saturating_add(self.divide_by_zero)
            .saturating_add(self.range_overflow)
    }
}

/// Lock-free fault sink that counts reports per code.
///
/// # RT Safety
///
/// `report` is a relaxed fetch-add plus a relaxed store: no allocation, no
/// blocking, bounded time. Safe to call from the sampler interrupt.
///
/// # Example
///
/// ```rust
/// use airdata_faults::{FaultCode, FaultSink, RecordingFaultSink};
///
/// let sink = RecordingFaultSink::new();
/// sink.report(FaultCode::FilterError);
/// sink.report(FaultCode::FilterError);
///
/// assert_eq!(sink.count(FaultCode::FilterError), 2);
/// assert_eq!(sink.counts().total(), 2);
/// ```
#[derive(Debug)]
pub struct RecordingFaultSink {
    overrun: AtomicU32,
    filter_error: AtomicU32,
    divide_by_zero: AtomicU32,
    range_overflow: AtomicU32,
    last: AtomicU8,
}

impl Default for RecordingFaultSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingFaultSink {
    /// Create a sink with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overrun: AtomicU32::new(0),
            filter_error: AtomicU32::new(0),
            divide_by_zero: AtomicU32::new(0),
            range_overflow: AtomicU32::new(0),
            last: AtomicU8::new(NO_FAULT),
        }
    }

    fn counter(&self, code: FaultCode) -> &AtomicU32 {
        match code {
            FaultCode::Overrun => &self.overrun,
            FaultCode::FilterError => &self.filter_error,
            FaultCode::CompensateDivideByZero => &self.divide_by_zero,
            FaultCode::CompensateRangeOverflow => &self.range_overflow,
        }
    }

    /// Number of reports of `code`.
    #[must_use]
    pub fn count(&self, code: FaultCode) -> u32 {
        self.counter(code).load(Ordering::Relaxed)
    }

    /// Snapshot of every counter.
    #[must_use]
    pub fn counts(&self) -> FaultCounts {
        FaultCounts {
            overrun: self.overrun.load(Ordering::Relaxed),
            filter_error: self.filter_error.load(Ordering::Relaxed),
            divide_by_zero: self.divide_by_zero.load(Ordering::Relaxed),
            range_overflow: self.range_overflow.load(Ordering::Relaxed),
        }
    }

    /// Most recently reported fault, if any.
    #[must_use]
    pub fn last(&self) -> Option<FaultCode> {
        FaultCode::from_code(self.last.load(Ordering::Relaxed))
    }

    /// True if nothing has been reported since creation or the last reset.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.last().is_none()
    }

    /// Take a snapshot and zero every counter.
    pub fn snapshot_and_reset(&self) -> FaultCounts {
        let counts = FaultCounts {
            overrun: self.overrun.swap(0, Ordering::Relaxed),
            filter_error: self.filter_error.swap(0, Ordering::Relaxed),
            divide_by_zero: self.divide_by_zero.swap(0, Ordering::Relaxed),
            range_overflow: self.range_overflow.swap(0, Ordering::Relaxed),
        };
        self.last.store(NO_FAULT, Ordering::Relaxed);
        counts
    }
}

impl FaultSink for RecordingFaultSink {
    #[inline]
    fn report(&self, code: FaultCode) {
        // Saturates at u32::MAX.
        self.counter(code)
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .unwrap_or(u32::MAX);
        self.last.store(code.code(), Ordering::Relaxed);
    }
}
