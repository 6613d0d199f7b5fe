//! Host-side fault sinks: an ordered fault log and a `tracing` adapter.
//!
//! Both allocate or format on report and are meant for the background loop,
//! simulation, and tests. The sampler interrupt on target reports into a
//! [`RecordingFaultSink`](crate::RecordingFaultSink) instead.

use crate::fault::{FaultCode, FaultSeverity};
use crate::sink::FaultSink;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use std::vec::Vec;

/// One entry of a [`FaultLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultRecord {
    /// Reported fault.
    pub code: FaultCode,
    /// Position in the log, starting at 0.
    pub sequence: u64,
    /// Time since the log was created.
    pub elapsed: Duration,
}

/// Ordered, timestamped fault log.
///
/// # Example
///
/// ```rust
/// use airdata_faults::{FaultCode, FaultLog, FaultSink};
///
/// let log = FaultLog::new();
/// log.report(FaultCode::Overrun);
/// log.report(FaultCode::CompensateDivideByZero);
///
/// assert_eq!(
///     log.codes(),
///     vec![FaultCode::Overrun, FaultCode::CompensateDivideByZero]
/// );
/// ```
#[derive(Debug)]
pub struct FaultLog {
    epoch: Instant,
    records: Mutex<Vec<FaultRecord>>,
}

impl Default for FaultLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultLog {
    /// Create an empty log; timestamps are measured from this call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every record, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<FaultRecord> {
        self.records.lock().clone()
    }

    /// Reported codes, oldest first.
    #[must_use]
    pub fn codes(&self) -> Vec<FaultCode> {
        self.records.lock().iter().map(|r| r.code).collect()
    }

    /// Number of reports of `code`.
    #[must_use]
    pub fn count(&self, code: FaultCode) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.code == code)
            .count()
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Most recent record.
    #[must_use]
    pub fn last(&self) -> Option<FaultRecord> {
        self.records.lock().last().copied()
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl FaultSink for FaultLog {
    fn report(&self, code: FaultCode) {
        let elapsed = self.epoch.elapsed();
        let mut records = self.records.lock();
        let sequence = records.len() as u64;
        records.push(FaultRecord {
            code,
            sequence,
            elapsed,
        });
    }
}

/// Fault sink adapter that emits a `tracing` event before forwarding.
///
/// Critical faults log at `error`, warnings at `warn`. Fields: `fault` (stable
/// identifier), `code`, `severity`, `action`.
///
/// ```rust
/// use airdata_faults::{FaultCode, FaultSink, RecordingFaultSink, TracingFaultSink};
///
/// let sink = TracingFaultSink::new(RecordingFaultSink::new());
/// sink.report(FaultCode::FilterError);
/// assert_eq!(sink.inner().count(FaultCode::FilterError), 1);
/// ```
#[derive(Debug, Default)]
pub struct TracingFaultSink<S> {
    inner: S,
}

impl<S: FaultSink> TracingFaultSink<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Wrapped sink.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap into the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FaultSink> FaultSink for TracingFaultSink<S> {
    fn report(&self, code: FaultCode) {
        match code.severity() {
            FaultSeverity::Critical => tracing::error!(
                fault = code.as_str(),
                code = code.code(),
                severity = %code.severity(),
                action = ?code.action(),
                "{code}"
            ),
            FaultSeverity::Warning => tracing::warn!(
                fault = code.as_str(),
                code = code.code(),
                severity = %code.severity(),
                action = ?code.action(),
                "{code}"
            ),
        }
        self.inner.report(code);
    }
}
