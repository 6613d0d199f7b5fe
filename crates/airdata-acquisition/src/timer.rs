//! Simulated timer peripheral for host-side runs and tests.

use crate::irq::TickInterrupt;
use crate::port::AirDataPort;
use crate::source::SampleSource;
use airdata_faults::{FaultCode, FaultSink};
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// What happened to a simulated tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDelivery {
    /// The sampler ran; carries its overrun report, if any.
    Serviced(Option<FaultCode>),
    /// The tick source was masked; the tick is latched as pending.
    Deferred,
}

/// Drives a [`SampleSource`] the way the timer peripheral does.
///
/// A tick that fires while the source's tick line is masked is latched as pending
/// instead of running the sampler, the way an interrupt controller holds a
/// pending bit. Further ticks while masked coalesce into that one pending
/// tick. [`service_pending`](Self::service_pending) runs it once the mask is
/// released.
///
/// Single-threaded: fire ticks from the same thread that takes the mask.
///
/// ```rust
/// use airdata_acquisition::prelude::*;
/// use airdata_faults::RecordingFaultSink;
///
/// let source = SampleSource::new(SoftwareTickInterrupt::new());
/// let timer = SimulatedTimer::new(&source);
/// let faults = RecordingFaultSink::new();
/// let mut port = FixedPort::new(RawSample::new(0, 10, 100));
///
/// let section = source.critical_section();
/// assert_eq!(timer.fire(&mut port, &faults), TickDelivery::Deferred);
/// let raw = section.consume();
/// drop(section);
///
/// assert_eq!(raw, RawSample::POWER_ON);
/// assert_eq!(
///     timer.service_pending(&mut port, &faults),
///     Some(TickDelivery::Serviced(None))
/// );
/// ```
#[derive(Debug)]
pub struct SimulatedTimer<'a, I: TickInterrupt> {
    source: &'a SampleSource<I>,
    pending: AtomicBool,
    deferred: AtomicU32,
}

impl<'a, I: TickInterrupt> SimulatedTimer<'a, I> {
    /// Attach a timer to `source`, gated by the source's own tick line.
    pub fn new(source: &'a SampleSource<I>) -> Self {
        Self {
            source,
            pending: AtomicBool::new(false),
            deferred: AtomicU32::new(0),
        }
    }

    /// Fire one period.
    pub fn fire<P, S>(&self, port: &mut P, faults: &S) -> TickDelivery
    where
        P: AirDataPort + ?Sized,
        S: FaultSink + ?Sized,
    {
        if self.source.tick_line().is_masked() {
            self.pending.store(true, Ordering::Release);
            self.deferred.fetch_add(1, Ordering::Relaxed);
            TickDelivery::Deferred
        } else {
            TickDelivery::Serviced(self.source.on_tick(port, faults))
        }
    }

    /// Run the pending tick, if there is one and the source is unmasked.
    ///
    /// Returns `None` when nothing is pending and `Some(Deferred)` when a tick
    /// is pending but the source is still masked.
    pub fn service_pending<P, S>(&self, port: &mut P, faults: &S) -> Option<TickDelivery>
    where
        P: AirDataPort + ?Sized,
        S: FaultSink + ?Sized,
    {
        if !self.pending.load(Ordering::Acquire) {
            return None;
        }
        if self.source.tick_line().is_masked() {
            return Some(TickDelivery::Deferred);
        }
        self.pending.store(false, Ordering::Release);
        Some(TickDelivery::Serviced(self.source.on_tick(port, faults)))
    }

    /// True while a deferred tick waits to be serviced.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Number of ticks that arrived while masked.
    #[must_use]
    pub fn deferred_ticks(&self) -> u32 {
        self.deferred.load(Ordering::Relaxed)
    }
}
