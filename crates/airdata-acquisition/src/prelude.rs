//! Prelude for convenient imports.
//!
//! ```rust
//! use airdata_acquisition::prelude::*;
//! ```

pub use crate::{
    AirDataPort, CriticalSection, FixedPort, MaskStats, RawSample, SampleSlot, SampleSource,
    ScriptedPort, SimulatedTimer, SoftwareTickInterrupt, SourceCounters, TICK_PERIOD_US,
    TickDelivery, TickInterrupt, TickMask,
};
