//! The periodic sampler: the body of the 10 ms timer interrupt.

use crate::irq::{TickInterrupt, TickMask};
use crate::port::AirDataPort;
use crate::sample::RawSample;
use crate::slot::SampleSlot;
use airdata_faults::{FaultCode, FaultSink};
use portable_atomic::{AtomicU32, Ordering};

/// Nominal sampling period in microseconds.
pub const TICK_PERIOD_US: u32 = 10_000;

/// Diagnostic counters of a [`SampleSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceCounters {
    /// Ticks serviced.
    pub ticks: u32,
    /// Ticks that replaced a sample the consumer had not read.
    pub overruns: u32,
}

/// Periodic air-data producer bound to its tick interrupt line.
///
/// Owns the shared [`SampleSlot`] and the [`TickInterrupt`] line whose timer
/// runs [`on_tick`](Self::on_tick). `on_tick` is the whole interrupt body:
/// read the sensor, publish, report an overrun if the previous sample was
/// never consumed. A missed sample is dropped, never queued; the next tick
/// always samples again.
///
/// The consumer reads the slot only through
/// [`critical_section`](Self::critical_section), which masks this source's
/// own line. There is no way to consume a sample with some other line masked.
///
/// # RT Safety
///
/// - Register reads, one atomic swap, two relaxed counter increments
/// - No allocation, no logging, no blocking
/// - Never calls into the filter or compensation stages
///
/// # Example
///
/// ```rust
/// use airdata_acquisition::{FixedPort, RawSample, SampleSource, SoftwareTickInterrupt};
/// use airdata_faults::{FaultCode, RecordingFaultSink};
///
/// static SOURCE: SampleSource<SoftwareTickInterrupt> =
///     SampleSource::new(SoftwareTickInterrupt::new());
///
/// let faults = RecordingFaultSink::new();
/// let mut port = FixedPort::new(RawSample::new(0, 1000, 100_000));
///
/// assert_eq!(SOURCE.on_tick(&mut port, &faults), None);
/// assert_eq!(SOURCE.on_tick(&mut port, &faults), Some(FaultCode::Overrun));
/// assert_eq!(faults.count(FaultCode::Overrun), 1);
/// ```
#[derive(Debug)]
pub struct SampleSource<I: TickInterrupt> {
    slot: SampleSlot,
    tick: I,
    ticks: AtomicU32,
    overruns: AtomicU32,
}

impl<I: TickInterrupt + Default> Default for SampleSource<I> {
    fn default() -> Self {
        Self::new(I::default())
    }
}

impl<I: TickInterrupt> SampleSource<I> {
    /// Create a source driven by `tick`, its slot holding the power-on sample.
    #[must_use]
    pub const fn new(tick: I) -> Self {
        Self::with_slot(tick, SampleSlot::new())
    }

    /// Create a source around an existing slot.
    #[must_use]
    pub const fn with_slot(tick: I, slot: SampleSlot) -> Self {
        Self {
            slot,
            tick,
            ticks: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
        }
    }

    /// Service one timer tick.
    ///
    /// Returns `Some(FaultCode::Overrun)` when the previous sample had not been
    /// consumed; that fault has already been reported to `faults` exactly once.
    #[inline]
    pub fn on_tick<P, S>(&self, port: &mut P, faults: &S) -> Option<FaultCode>
    where
        P: AirDataPort + ?Sized,
        S: FaultSink + ?Sized,
    {
        let sample = port.read_sample();
        let overrun = self.slot.publish(sample);
        self.ticks.fetch_add(1, Ordering::Relaxed);

        if overrun {
            self.overruns.fetch_add(1, Ordering::Relaxed);
            faults.report(FaultCode::Overrun);
            Some(FaultCode::Overrun)
        } else {
            None
        }
    }

    /// Mask this source's tick line and open the slot for consumption.
    ///
    /// The line is restored when the returned guard is dropped.
    pub fn critical_section(&self) -> CriticalSection<'_, I> {
        CriticalSection {
            _mask: TickMask::acquire(&self.tick),
            slot: &self.slot,
        }
    }

    /// The tick line this source is sampled on.
    #[must_use]
    pub fn tick_line(&self) -> &I {
        &self.tick
    }

    /// Current slot content, without consuming it.
    #[must_use]
    pub fn peek(&self) -> RawSample {
        self.slot.peek()
    }

    /// True if the latest sample has not been consumed yet.
    #[must_use]
    pub fn is_sample_available(&self) -> bool {
        self.slot.is_available()
    }

    /// Snapshot of the tick and overrun counters.
    #[must_use]
    pub fn counters(&self) -> SourceCounters {
        SourceCounters {
            ticks: self.ticks.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
        }
    }
}

/// Consumer access to a [`SampleSource`]'s slot, with its tick line masked.
///
/// ```rust
/// use airdata_acquisition::prelude::*;
///
/// let source = SampleSource::new(SoftwareTickInterrupt::new());
/// {
///     let section = source.critical_section();
///     assert!(source.tick_line().is_masked());
///     assert_eq!(section.consume(), RawSample::POWER_ON);
/// }
/// assert!(!source.tick_line().is_masked());
/// ```
#[derive(Debug)]
#[must_use = "the tick line is unmasked as soon as the section is dropped"]
pub struct CriticalSection<'a, I: TickInterrupt> {
    _mask: TickMask<'a, I>,
    slot: &'a SampleSlot,
}

impl<I: TickInterrupt> CriticalSection<'_, I> {
    /// Read the current sample and mark it consumed.
    ///
    /// Returns the current content whether or not it was available.
    #[inline]
    pub fn consume(&self) -> RawSample {
        self.slot.take()
    }
}
