//! # airdata-pipeline
//!
//! The background half of the air-data controller: consume the latest raw
//! sample, scale it, compensate it and escalate faults.
//!
//! ## Architecture
//!
//! ```text
//! SampleSlot ──► AirDataFilter ──► FilterErrorDebounce ──► FaultSink (FilterError)
//!  (tick masked)       │
//!                      ▼
//!                 compensate_into ──────────────────────► FaultSink (immediate)
//!                      │
//!                      ▼
//!                  SampleSink
//! ```
//!
//! - **[`AirDataFilter`]**: reads and clears the slot inside the source's
//!   critical section, with its own tick line held by a [`TickMask`], and scales the temperature by 4013/4000.
//! - **[`compensate`]**: `speed / temp`, guarded against division by zero
//!   and 16-bit overflow. A failed compensation leaves the output untouched.
//! - **[`FilterErrorDebounce`]**: tolerates a bounded streak of sensor errors.
//! - **[`AirDataController`]**: one [`step`](AirDataController::step) per
//!   background loop iteration.
//!
//! ## Escalation Policy
//!
//! | Fault | Policy |
//! |-------|--------|
//! | `FilterError` | reported on each pass once the streak exceeds the tolerance (default 5) |
//! | `CompensateDivideByZero` | reported immediately |
//! | `CompensateRangeOverflow` | reported immediately |
//! | `Overrun` | reported by the sample source, never by the controller |
//!
//! [`TickMask`]: airdata_acquisition::TickMask
//!
//! ## Example
//!
//! ```rust
//! use airdata_acquisition::prelude::*;
//! use airdata_faults::{FaultCode, RecordingFaultSink};
//! use airdata_pipeline::prelude::*;
//!
//! # fn main() -> Result<(), ConfigError> {
//! let source = SampleSource::new(SoftwareTickInterrupt::new());
//! let faults = RecordingFaultSink::new();
//! let mut controller = AirDataController::new(&source, &faults, (), PipelineConfig::default())?;
//!
//! let mut port = FixedPort::new(RawSample::new(2, 1000, 100_000));
//! for _ in 0..6 {
//!     source.on_tick(&mut port, &faults);
//!     controller.step();
//! }
//!
//! assert_eq!(faults.count(FaultCode::FilterError), 1);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod compensate;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod prelude;
pub mod sink;
pub mod stats;

pub use compensate::{CompensatedSample, compensate, compensate_into};
pub use config::{PipelineConfig, ScaleFactor};
pub use controller::{AirDataController, StepReport};
pub use debounce::{DebounceDecision, FilterErrorDebounce};
pub use error::{ConfigError, ConfigResult};
pub use filter::{AirDataFilter, FilteredSample};
pub use sink::{LatestSample, SampleSink};
pub use stats::PipelineStats;
