//! Critical-section consumer of the raw sample slot and the scale transform.

use crate::config::ScaleFactor;
use airdata_acquisition::{RawSample, SampleSource, TickInterrupt};
use airdata_faults::{FaultCode, SensorStatus};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw sample after scaling.
///
/// `temp_c` is 32 bits wide so the full 16-bit register range, scaled, fits
/// without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilteredSample {
    /// Sensor error word, copied verbatim.
    pub error_word: u8,
    /// Scaled temperature.
    pub temp_c: u32,
    /// Airspeed, copied verbatim.
    pub speed: u32,
}

impl FilteredSample {
    /// Create a filtered sample.
    #[must_use]
    pub const fn new(error_word: u8, temp_c: u32, speed: u32) -> Self {
        Self {
            error_word,
            temp_c,
            speed,
        }
    }

    /// Decoded sensor error word.
    #[must_use]
    pub const fn sensor_status(&self) -> SensorStatus {
        SensorStatus::from_error_word(self.error_word)
    }
}

/// Reads the latest raw sample under the source's tick mask and scales it.
///
/// # RT Safety
///
/// `filter` holds the source's tick line masked for one atomic read-and-clear plus
/// one 64-bit multiply and divide. It does not allocate, log or report.
///
/// # Example
///
/// ```rust
/// use airdata_acquisition::prelude::*;
/// use airdata_faults::{FaultCode, RecordingFaultSink};
/// use airdata_pipeline::AirDataFilter;
///
/// let source = SampleSource::new(SoftwareTickInterrupt::new());
/// let filter = AirDataFilter::new(&source);
///
/// let mut port = FixedPort::new(RawSample::new(0, 1000, 100_000));
/// source.on_tick(&mut port, &RecordingFaultSink::new());
///
/// let (sample, fault) = filter.filter();
/// assert_eq!(sample.temp_c, 1003);
/// assert_eq!(sample.speed, 100_000);
/// assert_eq!(fault, None);
/// assert!(!source.tick_line().is_masked());
/// ```
#[derive(Debug)]
pub struct AirDataFilter<'a, I: TickInterrupt> {
    source: &'a SampleSource<I>,
    scale: ScaleFactor,
}

impl<'a, I: TickInterrupt> AirDataFilter<'a, I> {
    /// Create a filter with the air-data scale.
    pub fn new(source: &'a SampleSource<I>) -> Self {
        Self::with_scale(source, ScaleFactor::AIR_DATA)
    }

    /// Create a filter with a custom scale.
    pub fn with_scale(source: &'a SampleSource<I>, scale: ScaleFactor) -> Self {
        Self { source, scale }
    }

    /// The source this filter consumes.
    #[must_use]
    pub fn source(&self) -> &'a SampleSource<I> {
        self.source
    }

    /// Scale applied to the temperature register.
    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Consume the latest raw sample and scale it.
    ///
    /// The slot read, the transform and the flag clear happen with the
    /// source's own tick line masked. The error word is checked after the mask is released:
    /// any non-zero word yields `Some(FaultCode::FilterError)`. The sample is
    /// returned in either case.
    ///
    /// Filtering again before the next tick returns the same sample.
    #[must_use]
    pub fn filter(&self) -> (FilteredSample, Option<FaultCode>) {
        let filtered = {
            let section = self.source.critical_section();
            self.transform(section.consume())
        };

        let fault = (filtered.error_word != 0).then_some(FaultCode::FilterError);
        (filtered, fault)
    }

    /// Scale `raw` without touching the slot.
    #[inline]
    #[must_use]
    pub fn transform(&self, raw: RawSample) -> FilteredSample {
        FilteredSample {
            error_word: raw.error_word,
            temp_c: self.scale.apply(raw.temp_c),
            speed: raw.speed,
        }
    }
}
