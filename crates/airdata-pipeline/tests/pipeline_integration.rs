//! End-to-end tests: sample source, filter, compensation and escalation.

use airdata_acquisition::prelude::*;
use airdata_faults::{FaultCode, FaultLog, FaultSink, RecordingFaultSink, TracingFaultSink};
use airdata_pipeline::prelude::*;
use proptest::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn with_sample(error_word: u8, temp_c: u16, speed: u32) -> FixedPort {
    FixedPort::new(RawSample::new(error_word, temp_c, speed))
}

#[test]
fn five_filter_errors_then_success_reports_nothing() -> TestResult {
    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let log = FaultLog::new();
    let mut controller = AirDataController::new(&source, &log, (), PipelineConfig::default())?;

    let mut port = with_sample(1, 1000, 100_000);
    for _ in 0..5 {
        source.on_tick(&mut port, &log);
        controller.step();
    }
    port.set(RawSample::new(0, 1000, 100_000));
    source.on_tick(&mut port, &log);
    let report = controller.step();

    assert_eq!(report.debounce, DebounceDecision::Clear);
    assert!(log.is_empty());
    assert_eq!(controller.stats().filter_errors, 5);
    assert_eq!(controller.stats().longest_filter_streak, 5);
    Ok(())
}

#[test]
fn six_filter_errors_report_once_on_the_sixth() -> TestResult {
    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let log = FaultLog::new();
    let mut controller = AirDataController::new(&source, &log, (), PipelineConfig::default())?;

    let mut port = with_sample(4, 1000, 100_000);
    for iteration in 1..=6 {
        source.on_tick(&mut port, &log);
        let report = controller.step();
        assert_eq!(report.debounce.escalates(), iteration == 6);
    }

    assert_eq!(log.codes(), vec![FaultCode::FilterError]);
    Ok(())
}

#[test]
fn compensated_output_survives_faults() -> TestResult {
    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let faults = RecordingFaultSink::new();
    let mut downstream = Vec::new();
    let sink = |s: &CompensatedSample| downstream.push(s.temp_c);
    let config = PipelineConfig::default().with_temp_scale(ScaleFactor::UNITY);
    let mut controller = AirDataController::new(&source, &faults, sink, config)?;

    for (temp_c, speed) in [(1000, 100_000), (0, 100_000), (1, 700_000_000), (100, 5_000)] {
        let mut port = with_sample(0, temp_c, speed);
        source.on_tick(&mut port, &faults);
        controller.step();
    }
    drop(controller);

    assert_eq!(downstream, vec![100, 100, 100, 50]);
    assert_eq!(faults.count(FaultCode::CompensateDivideByZero), 1);
    assert_eq!(faults.count(FaultCode::CompensateRangeOverflow), 1);
    assert_eq!(faults.count(FaultCode::Overrun), 0);
    Ok(())
}

#[test]
fn overrun_reaches_shared_sink_alongside_controller_faults() -> TestResult {
    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let log = FaultLog::new();
    let mut controller = AirDataController::new(&source, &log, (), PipelineConfig::default())?;

    let mut port = with_sample(0, 1000, 100_000);
    source.on_tick(&mut port, &log);
    source.on_tick(&mut port, &log);
    controller.step();
    port.set(RawSample::new(0, 0, 100_000));
    source.on_tick(&mut port, &log);
    controller.step();

    assert_eq!(
        log.codes(),
        vec![FaultCode::Overrun, FaultCode::CompensateDivideByZero]
    );
    assert_eq!(source.counters().overruns, 1);
    assert_eq!(controller.stats().filter_escalations, 0);
    Ok(())
}

#[test]
fn deferred_tick_is_serviced_after_filter() -> TestResult {
    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let timer = SimulatedTimer::new(&source);
    let faults = RecordingFaultSink::new();
    let config = PipelineConfig::default();
    let mut controller = AirDataController::new(&source, &faults, LatestSample::new(), config)?;

    let mut port = with_sample(0, 1000, 100_000);
    assert_eq!(timer.fire(&mut port, &faults), TickDelivery::Serviced(None));

    {
        let _mask = TickMask::acquire(source.tick_line());
        assert_eq!(timer.fire(&mut port, &faults), TickDelivery::Deferred);
    }
    assert_eq!(
        timer.service_pending(&mut port, &faults),
        Some(TickDelivery::Serviced(Some(FaultCode::Overrun)))
    );

    controller.step();
    assert_eq!(controller.downstream().get().map(|s| s.temp_c), Some(99));
    assert!(source.tick_line().stats().is_balanced());
    Ok(())
}

/// Fault sink that checks the tick line state on every report.
#[derive(Debug)]
struct LineCheckingSink<'a> {
    line: &'a SoftwareTickInterrupt,
    reports: AtomicU32,
    masked_reports: AtomicU32,
}

impl<'a> LineCheckingSink<'a> {
    fn new(line: &'a SoftwareTickInterrupt) -> Self {
        Self {
            line,
            reports: AtomicU32::new(0),
            masked_reports: AtomicU32::new(0),
        }
    }
}

impl FaultSink for LineCheckingSink<'_> {
    fn report(&self, _code: FaultCode) {
        self.reports.fetch_add(1, Ordering::Relaxed);
        if self.line.is_masked() {
            self.masked_reports.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[test]
fn controller_faults_are_reported_with_tick_line_unmasked() -> TestResult {
    let line = SoftwareTickInterrupt::new();
    let source = SampleSource::new(&line);
    let sink = LineCheckingSink::new(&line);
    let config = PipelineConfig::strict().with_temp_scale(ScaleFactor::UNITY);
    let mut controller = AirDataController::new(&source, &sink, (), config)?;

    // Power-on slot: error word 1, escalates on the third pass.
    controller.run_for(4);
    for (temp_c, speed) in [(0, 100_000), (1, 700_000_000)] {
        let mut port = with_sample(0, temp_c, speed);
        source.on_tick(&mut port, &sink);
        controller.step();
    }

    let stats = controller.stats();
    assert_eq!(stats.filter_escalations, 2);
    assert_eq!(stats.compensation_faults, 2);
    assert_eq!(sink.reports.load(Ordering::Relaxed), 4);
    assert_eq!(sink.masked_reports.load(Ordering::Relaxed), 0);
    assert!(line.stats().is_balanced());
    Ok(())
}

#[test]
fn tracing_sink_logs_and_forwards() -> TestResult {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || -> TestResult {
        let source = SampleSource::new(SoftwareTickInterrupt::new());
        let faults = TracingFaultSink::new(RecordingFaultSink::new());
        let mut controller =
            AirDataController::new(&source, &faults, (), PipelineConfig::strict())?;

        let stats = controller.run_for(4);

        assert_eq!(stats.iterations, 4);
        assert_eq!(stats.filter_escalations, 2);
        assert_eq!(faults.inner().count(FaultCode::FilterError), 2);
        Ok(())
    })
}

#[cfg(feature = "serde")]
#[test]
fn config_from_json_drives_controller() -> TestResult {
    let config = PipelineConfig::from_json(
        r#"{
            "tick_period_us": 20000,
            "filter_error_tolerance": 1,
            "temp_scale": { "numerator": 1, "denominator": 1 }
        }"#,
    )?;
    assert_eq!(config.tick_period_us, 20_000);

    let source = SampleSource::new(SoftwareTickInterrupt::new());
    let faults = RecordingFaultSink::new();
    let mut controller = AirDataController::new(&source, &faults, (), config)?;

    controller.run_for(2);
    assert_eq!(faults.count(FaultCode::FilterError), 1);
    assert_eq!(controller.compensated().temp_c, 100);
    Ok(())
}

#[test]
fn config_errors_display() {
    insta::assert_snapshot!(
        ConfigError::TickPeriodOutOfRange(12).to_string(),
        @"Tick period 12 us outside supported range 1000..=1000000 us"
    );
    insta::assert_snapshot!(
        ConfigError::ZeroFilterErrorTolerance.to_string(),
        @"Filter error tolerance must be at least 1"
    );
    insta::assert_snapshot!(
        ConfigError::ZeroScaleDenominator.to_string(),
        @"Temperature scale denominator must be non-zero"
    );
}

proptest! {
    #[test]
    fn prop_escalations_follow_streak(errors in proptest::collection::vec(any::<bool>(), 1..100),
                                      tolerance in 1u32..8) {
        let source = SampleSource::new(SoftwareTickInterrupt::new());
        let faults = RecordingFaultSink::new();
        let config = PipelineConfig::default().with_filter_error_tolerance(tolerance);
        let mut controller = AirDataController::new(&source, &faults, (), config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut streak = 0u32;
        let mut expected = 0u32;
        for failed in errors {
            let mut port = with_sample(u8::from(failed), 1000, 100_000);
            source.on_tick(&mut port, &faults);
            let report = controller.step();

            streak = if failed { streak + 1 } else { 0 };
            let escalates = streak > tolerance;
            if escalates {
                expected += 1;
            }
            prop_assert_eq!(report.debounce.escalates(), escalates);
        }

        prop_assert_eq!(faults.count(FaultCode::FilterError), expected);
        prop_assert_eq!(faults.count(FaultCode::Overrun), 0);
        prop_assert!(!source.tick_line().is_masked());
    }

    #[test]
    fn prop_compensation_never_corrupts_output(temp_c in any::<u16>(), speed in any::<u32>()) {
        let source = SampleSource::new(SoftwareTickInterrupt::new());
        let faults = RecordingFaultSink::new();
        let config = PipelineConfig::default();
        let mut controller = AirDataController::new(&source, &faults, (), config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut port = with_sample(0, temp_c, speed);
        source.on_tick(&mut port, &faults);
        let report = controller.step();

        let filtered_temp = ScaleFactor::AIR_DATA.apply(temp_c);
        match speed.checked_div(filtered_temp).map(u16::try_from) {
            None => {
                let expected = Some(FaultCode::CompensateDivideByZero);
                prop_assert_eq!(report.compensation_fault, expected);
                prop_assert_eq!(controller.compensated(), CompensatedSample::POWER_ON);
            }
            Some(Err(_)) => {
                let expected = Some(FaultCode::CompensateRangeOverflow);
                prop_assert_eq!(report.compensation_fault, expected);
                prop_assert_eq!(controller.compensated(), CompensatedSample::POWER_ON);
            }
            Some(Ok(temp_c)) => {
                let expected = CompensatedSample::new(0, temp_c, speed);
                prop_assert_eq!(report.compensation_fault, None);
                prop_assert_eq!(controller.compensated(), expected);
            }
        }
    }
}
