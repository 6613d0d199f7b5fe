//! # airdata-faults
//!
//! Fault taxonomy and fault reporting for the air-data acquisition pipeline.
//!
//! Every failure of the acquisition and transform paths is carried as a
//! [`FaultCode`] value. Nothing in those paths unwinds: the periodic sampler
//! runs in interrupt context and the filter runs with the tick source masked,
//! neither of which may panic.
//!
//! ## Fault Taxonomy
//!
//! | Code | Fault | Escalation |
//! |------|-------|------------|
//! | 1 | [`FaultCode::Overrun`] | first occurrence |
//! | 2 | [`FaultCode::FilterError`] | debounced |
//! | 3 | [`FaultCode::CompensateDivideByZero`] | first occurrence |
//! | 4 | [`FaultCode::CompensateRangeOverflow`] | first occurrence |
//!
//! Code `0` is reserved for "no fault" and maps to `None`.
//!
//! ## Sinks
//!
//! - [`FaultSink`]: the single reporting operation, callable from ISR context
//! - [`RecordingFaultSink`]: lock-free per-code counters, `no_std`
//! - `FaultLog`: ordered, timestamped log (requires `std`)
//! - `TracingFaultSink`: structured `tracing` events around another sink (requires `std`)
//!
//! ## Example
//!
//! ```rust
//! use airdata_faults::prelude::*;
//!
//! let sink = RecordingFaultSink::new();
//! sink.report(FaultCode::Overrun);
//!
//! assert_eq!(sink.counts().overrun, 1);
//! assert_eq!(sink.last(), Some(FaultCode::Overrun));
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod fault;
pub mod prelude;
pub mod sensor;
pub mod sink;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod log;

pub use fault::{FaultAction, FaultCode, FaultSeverity, NO_FAULT};
pub use sensor::SensorStatus;
pub use sink::{FaultCounts, FaultSink, RecordingFaultSink};

#[cfg(feature = "std")]
pub use log::{FaultLog, FaultRecord, TracingFaultSink};
