//! The background loop: filter, debounce, compensate, escalate.

use crate::compensate::{CompensatedSample, compensate_into};
use crate::config::PipelineConfig;
use crate::debounce::{DebounceDecision, FilterErrorDebounce};
use crate::error::ConfigResult;
use crate::filter::{AirDataFilter, FilteredSample};
use crate::sink::SampleSink;
use crate::stats::PipelineStats;
use airdata_acquisition::{SampleSource, TickInterrupt};
use airdata_faults::{FaultCode, FaultSink};
use tracing::{debug, error, trace, warn};

/// What one controller iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Output of the filter stage.
    pub filtered: FilteredSample,
    /// Debounce outcome for the filter pass.
    pub debounce: DebounceDecision,
    /// Compensation fault, if compensation failed this iteration.
    pub compensation_fault: Option<FaultCode>,
    /// Sample handed downstream.
    pub compensated: CompensatedSample,
}

impl StepReport {
    /// Faults reported to the fault sink during this iteration, in order.
    pub fn escalations(&self) -> impl Iterator<Item = FaultCode> {
        let filter = self
            .debounce
            .escalates()
            .then_some(FaultCode::FilterError);
        filter.into_iter().chain(self.compensation_fault)
    }

    /// True if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.debounce.escalates() && self.compensation_fault.is_none()
    }
}

/// Air-data pipeline orchestrator.
///
/// Each [`step`](Self::step):
///
/// 1. filters the latest raw sample with the source's tick line masked;
/// 2. feeds the result to the [`FilterErrorDebounce`], reporting
///    `FilterError` once the streak exceeds the configured tolerance;
/// 3. compensates, reporting any compensation fault immediately;
/// 4. hands the current compensated sample to the downstream sink. After a
///    compensation fault that is the last good sample.
///
/// Faults are reported synchronously, outside the tick mask.
///
/// # Example
///
/// ```rust
/// use airdata_acquisition::prelude::*;
/// use airdata_faults::RecordingFaultSink;
/// use airdata_pipeline::prelude::*;
///
/// # fn main() -> Result<(), ConfigError> {
/// let source = SampleSource::new(SoftwareTickInterrupt::new());
/// let faults = RecordingFaultSink::new();
///
/// let mut controller = AirDataController::new(
///     &source,
///     &faults,
///     LatestSample::new(),
///     PipelineConfig::default(),
/// )?;
///
/// let mut port = FixedPort::new(RawSample::new(0, 1000, 100_000));
/// source.on_tick(&mut port, &faults);
///
/// let report = controller.step();
/// assert!(report.is_clean());
/// assert_eq!(controller.compensated().temp_c, 99);
/// assert_eq!(controller.downstream().get().map(|s| s.temp_c), Some(99));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AirDataController<'a, I, F, D>
where
    I: TickInterrupt,
    F: FaultSink,
    D: SampleSink,
{
    filter: AirDataFilter<'a, I>,
    debounce: FilterErrorDebounce,
    compensated: CompensatedSample,
    config: PipelineConfig,
    stats: PipelineStats,
    faults: F,
    downstream: D,
}

impl<'a, I, F, D> AirDataController<'a, I, F, D>
where
    I: TickInterrupt,
    F: FaultSink,
    D: SampleSink,
{
    /// Build a controller over `source`.
    ///
    /// The filter stage masks the tick line `source` is sampled on.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(
        source: &'a SampleSource<I>,
        faults: F,
        downstream: D,
        config: PipelineConfig,
    ) -> ConfigResult<Self> {
        config.validate()?;

        debug!(
            tick_period_us = config.tick_period_us,
            filter_error_tolerance = config.filter_error_tolerance,
            scale_numerator = config.temp_scale.numerator,
            scale_denominator = config.temp_scale.denominator,
            "Air data controller configured"
        );

        Ok(Self {
            filter: AirDataFilter::with_scale(source, config.temp_scale),
            debounce: FilterErrorDebounce::new(config.filter_error_tolerance),
            compensated: CompensatedSample::POWER_ON,
            config,
            stats: PipelineStats::default(),
            faults,
            downstream,
        })
    }

    /// Run one iteration.
    pub fn step(&mut self) -> StepReport {
        let previous_streak = self.debounce.streak();
        let (filtered, filter_fault) = self.filter.filter();
        let decision = self.debounce.record(filter_fault);

        match decision {
            DebounceDecision::Clear => {
                if previous_streak > 0 {
                    debug!(streak = previous_streak, "Filter error streak cleared");
                }
            }
            DebounceDecision::Tolerated { streak } => {
                self.stats.filter_errors = self.stats.filter_errors.saturating_add(1);
                debug!(
                    streak,
                    tolerance = self.debounce.tolerance(),
                    status = %filtered.sensor_status(),
                    "Filter error tolerated"
                );
            }
            DebounceDecision::Escalate { streak } => {
                self.stats.filter_errors = self.stats.filter_errors.saturating_add(1);
                self.stats.filter_escalations = self.stats.filter_escalations.saturating_add(1);
                warn!(
                    streak,
                    tolerance = self.debounce.tolerance(),
                    status = %filtered.sensor_status(),
                    error_word = filtered.error_word,
                    "Persistent filter error escalated"
                );
                self.faults.report(FaultCode::FilterError);
            }
        }

        let compensation_fault = compensate_into(&filtered, &mut self.compensated).err();
        if let Some(code) = compensation_fault {
            self.stats.compensation_faults = self.stats.compensation_faults.saturating_add(1);
            error!(
                fault = code.as_str(),
                code = code.code(),
                speed = filtered.speed,
                temp_c = filtered.temp_c,
                "Temperature compensation failed"
            );
            self.faults.report(code);
        }

        self.downstream.accept(&self.compensated);

        self.stats.iterations = self.stats.iterations.saturating_add(1);
        self.stats.longest_filter_streak = self.debounce.longest_streak();

        trace!(
            iteration = self.stats.iterations,
            temp_c = self.compensated.temp_c,
            speed = self.compensated.speed,
            streak = self.debounce.streak(),
            "Controller iteration"
        );

        StepReport {
            filtered,
            debounce: decision,
            compensation_fault,
            compensated: self.compensated,
        }
    }

    /// Step while `keep_running` returns true. Returns the iterations run.
    pub fn run<C: FnMut() -> bool>(&mut self, mut keep_running: C) -> u64 {
        let mut iterations: u64 = 0;
        while keep_running() {
            self.step();
            iterations = iterations.saturating_add(1);
        }
        iterations
    }

    /// Run exactly `iterations` steps.
    pub fn run_for(&mut self, iterations: u64) -> PipelineStats {
        let mut remaining = iterations;
        self.run(|| {
            let go = remaining > 0;
            remaining = remaining.saturating_sub(1);
            go
        });
        self.stats
    }

    /// Run forever.
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Last successfully compensated sample.
    #[must_use]
    pub fn compensated(&self) -> CompensatedSample {
        self.compensated
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Validated configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current consecutive filter error count.
    #[must_use]
    pub fn filter_error_streak(&self) -> u32 {
        self.debounce.streak()
    }

    /// The sample source being consumed.
    #[must_use]
    pub fn source(&self) -> &'a SampleSource<I> {
        self.filter.source()
    }

    /// The fault sink.
    #[must_use]
    pub fn fault_sink(&self) -> &F {
        &self.faults
    }

    /// The downstream sample sink.
    #[must_use]
    pub fn downstream(&self) -> &D {
        &self.downstream
    }

    /// Mutable access to the downstream sample sink.
    pub fn downstream_mut(&mut self) -> &mut D {
        &mut self.downstream
    }

    /// Tear down, returning the fault sink and the downstream sink.
    pub fn into_parts(self) -> (F, D) {
        (self.faults, self.downstream)
    }
}
