//! # airdata-acquisition
//!
//! Periodic air-data sampling and the hand-off of raw samples from interrupt
//! context to the background loop.
//!
//! ## Model
//!
//! A hardware timer fires every 10 ms and runs [`SampleSource::on_tick`], which
//! reads the three sensor registers through an [`AirDataPort`] and publishes
//! them to the [`SampleSlot`]. The source owns its tick line. The background
//! loop consumes the slot through [`SampleSource::critical_section`], which
//! masks that line with a [`TickMask`] guard. Unrelated interrupts keep running.
//!
//! ```text
//!  timer ISR (10 ms)                       background loop
//!  ─────────────────                       ───────────────
//!  read ports                              critical_section ──┐
//!  slot.publish ──► [ RawSample | flag ] ◄── section.consume  │ tick masked
//!  flag was set? ─► FaultSink(Overrun)     drop(section) ─────┘
//! ```
//!
//! ## RT Safety
//!
//! - The sample and its available flag live in one 64-bit atomic word, so a
//!   sample is never observed half-written.
//! - `on_tick` does no allocation, no logging and no blocking.
//! - A sample is consumed only through a [`CriticalSection`], which holds a
//!   [`TickMask`] on the source's own tick line.
//!
//! ## Example
//!
//! ```rust
//! use airdata_acquisition::prelude::*;
//! use airdata_faults::RecordingFaultSink;
//!
//! let source = SampleSource::new(SoftwareTickInterrupt::new());
//! let faults = RecordingFaultSink::new();
//! let mut port = FixedPort::new(RawSample::new(0, 1000, 100_000));
//!
//! assert_eq!(source.on_tick(&mut port, &faults), None);
//!
//! let raw = source.critical_section().consume();
//! assert_eq!(raw.temp_c, 1000);
//! assert!(!source.tick_line().is_masked());
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

pub mod irq;
pub mod port;
pub mod prelude;
pub mod sample;
pub mod slot;
pub mod source;
pub mod timer;

pub use irq::{MaskStats, SoftwareTickInterrupt, TickInterrupt, TickMask};
pub use port::{AirDataPort, FixedPort, ScriptedPort};
pub use sample::RawSample;
pub use slot::SampleSlot;
pub use source::{CriticalSection, SampleSource, SourceCounters, TICK_PERIOD_US};
pub use timer::{SimulatedTimer, TickDelivery};
