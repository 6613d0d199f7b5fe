//! Prelude for convenient imports.
//!
//! ```rust
//! use airdata_pipeline::prelude::*;
//! ```

pub use crate::{
    AirDataController, AirDataFilter, CompensatedSample, ConfigError, ConfigResult,
    DebounceDecision, FilterErrorDebounce, FilteredSample, LatestSample, PipelineConfig,
    PipelineStats, SampleSink, ScaleFactor, StepReport, compensate, compensate_into,
};
