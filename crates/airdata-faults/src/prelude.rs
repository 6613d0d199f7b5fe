//! Prelude for convenient imports.
//!
//! ```rust
//! use airdata_faults::prelude::*;
//! ```

pub use crate::{
    FaultAction, FaultCode, FaultCounts, FaultSeverity, FaultSink, NO_FAULT, RecordingFaultSink,
    SensorStatus,
};

#[cfg(feature = "std")]
pub use crate::{FaultLog, FaultRecord, TracingFaultSink};
