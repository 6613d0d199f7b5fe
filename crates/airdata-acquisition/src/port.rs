//! Hardware acquisition boundary.

use crate::sample::RawSample;

/// Register-level access to the airspeed sensor.
///
/// The sampler reads the three registers once per tick, in declaration order.
/// Implementations return raw register values; there is no protocol or byte
/// order negotiation at this level.
pub trait AirDataPort {
    /// Read the 8-bit error word register.
    fn read_error_word(&mut self) -> u8;
    /// Read the 16-bit temperature register.
    fn read_temperature(&mut self) -> u16;
    /// Read the 32-bit airspeed register.
    fn read_speed(&mut self) -> u32;

    /// Read all three registers, in order.
    fn read_sample(&mut self) -> RawSample {
        let error_word = self.read_error_word();
        let temp_c = self.read_temperature();
        let speed = self.read_speed();
        RawSample::new(error_word, temp_c, speed)
    }
}

impl<P: AirDataPort + ?Sized> AirDataPort for &mut P {
    #[inline]
    fn read_error_word(&mut self) -> u8 {
        (**self).read_error_word()
    }

    #[inline]
    fn read_temperature(&mut self) -> u16 {
        (**self).read_temperature()
    }

    #[inline]
    fn read_speed(&mut self) -> u32 {
        (**self).read_speed()
    }
}

/// Port that returns the same reading on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPort {
    /// Reading returned by every register read.
    pub sample: RawSample,
}

impl FixedPort {
    /// Create a port that always reads `sample`.
    #[must_use]
    pub const fn new(sample: RawSample) -> Self {
        Self { sample }
    }

    /// Change the reading seen by subsequent ticks.
    pub fn set(&mut self, sample: RawSample) {
        self.sample = sample;
    }
}

impl AirDataPort for FixedPort {
    fn read_error_word(&mut self) -> u8 {
        self.sample.error_word
    }

    fn read_temperature(&mut self) -> u16 {
        self.sample.temp_c
    }

    fn read_speed(&mut self) -> u32 {
        self.sample.speed
    }
}

/// Port that replays a script of readings, one per tick.
///
/// The cursor advances after the speed register, the last one the sampler
/// reads. Once the script is exhausted the final reading repeats; an empty
/// script reads all zeros.
///
/// ```rust
/// use airdata_acquisition::{AirDataPort, RawSample, ScriptedPort};
///
/// let script = [RawSample::new(0, 10, 100), RawSample::new(2, 20, 200)];
/// let mut port = ScriptedPort::new(&script);
///
/// assert_eq!(port.read_sample(), script[0]);
/// assert_eq!(port.read_sample(), script[1]);
/// assert_eq!(port.read_sample(), script[1]);
/// assert!(port.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedPort<'a> {
    script: &'a [RawSample],
    cursor: usize,
}

impl<'a> ScriptedPort<'a> {
    /// Create a port replaying `script`.
    #[must_use]
    pub const fn new(script: &'a [RawSample]) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of complete readings taken so far.
    #[must_use]
    pub fn readings_taken(&self) -> usize {
        self.cursor
    }

    /// True once every scripted reading has been returned at least once.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.script.len()
    }

    fn current(&self) -> RawSample {
        self.script
            .get(self.cursor)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or_default()
    }
}

impl AirDataPort for ScriptedPort<'_> {
    fn read_error_word(&mut self) -> u8 {
        self.current().error_word
    }

    fn read_temperature(&mut self) -> u16 {
        self.current().temp_c
    }

    fn read_speed(&mut self) -> u32 {
        let speed = self.current().speed;
        self.cursor = self.cursor.saturating_add(1);
        speed
    }
}
