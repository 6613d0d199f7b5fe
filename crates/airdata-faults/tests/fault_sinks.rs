//! Integration tests for fault codes and fault sinks.

use airdata_faults::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn fault_display_snapshots() {
    insta::assert_snapshot!(FaultCode::Overrun.to_string(), @"Sample overrun: previous sample not consumed");
    insta::assert_snapshot!(FaultCode::FilterError.to_string(), @"Air data filter reported a sensor error");
    insta::assert_snapshot!(FaultCode::CompensateDivideByZero.to_string(), @"Temperature compensation divide by zero");
    insta::assert_snapshot!(FaultCode::CompensateRangeOverflow.to_string(), @"Compensated temperature out of 16-bit range");
}

#[test]
fn sensor_status_display_snapshots() {
    insta::assert_snapshot!(SensorStatus::from_error_word(1).to_string(), @"colder than min temp");
    insta::assert_snapshot!(SensorStatus::from_error_word(2).to_string(), @"hotter than max temp");
    insta::assert_snapshot!(SensorStatus::from_error_word(3).to_string(), @"loss of power");
    insta::assert_snapshot!(SensorStatus::from_error_word(4).to_string(), @"calibration failed");
    insta::assert_snapshot!(SensorStatus::from_error_word(200).to_string(), @"unknown error word 200");
}

#[test]
fn recording_sink_counts_concurrent_reports() {
    let sink = Arc::new(RecordingFaultSink::new());
    let reports_per_thread: u32 = 5_000;

    let handles: Vec<_> = FaultCode::ALL
        .into_iter()
        .map(|code| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for _ in 0..reports_per_thread {
                    sink.report(code);
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok(), "reporter thread panicked");
    }

    let counts = sink.counts();
    for code in FaultCode::ALL {
        assert_eq!(counts.get(code), reports_per_thread);
    }
    assert_eq!(counts.total(), reports_per_thread * 4);
}

#[test]
fn sinks_compose_through_references() {
    let log = FaultLog::new();
    let traced = TracingFaultSink::new(&log);

    traced.report(FaultCode::Overrun);
    traced.report(FaultCode::CompensateRangeOverflow);

    assert_eq!(
        log.codes(),
        vec![FaultCode::Overrun, FaultCode::CompensateRangeOverflow]
    );
}

#[test]
fn dyn_fault_sink_is_object_safe() {
    let recorder = RecordingFaultSink::new();
    let sink: &dyn FaultSink = &recorder;
    sink.report(FaultCode::FilterError);
    assert_eq!(recorder.last(), Some(FaultCode::FilterError));
}

proptest::proptest! {
    #[test]
    fn prop_recording_sink_matches_log(codes in proptest::collection::vec(1u8..=4, 0..64)) {
        let recorder = RecordingFaultSink::new();
        let log = FaultLog::new();

        for code in codes.iter().filter_map(|c| FaultCode::from_code(*c)) {
            recorder.report(code);
            log.report(code);
        }

        for code in FaultCode::ALL {
            proptest::prop_assert_eq!(recorder.count(code) as usize, log.count(code));
        }
        proptest::prop_assert_eq!(recorder.last(), log.last().map(|r| r.code));
    }

    #[test]
    fn prop_raw_code_round_trip(raw in 0u8..=255) {
        let decoded = FaultCode::from_code(raw);
        if (1..=4).contains(&raw) {
            proptest::prop_assert_eq!(FaultCode::to_raw(decoded), raw);
        } else {
            proptest::prop_assert_eq!(decoded, None);
        }
    }
}
