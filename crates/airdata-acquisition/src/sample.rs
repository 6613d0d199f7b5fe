//! Raw sensor sample and its packed slot representation.

use airdata_faults::SensorStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One reading of the airspeed sensor, in raw register ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct RawSample {
    /// Sensor error word, 0 = ok.
    pub error_word: u8,
    /// Temperature register.
    pub temp_c: u16,
    /// Airspeed register.
    pub speed: u32,
}

const TEMP_SHIFT: u32 = 8;
const SPEED_SHIFT: u32 = 24;

/// Mask covering the 56 bits a packed sample occupies.
pub(crate) const SAMPLE_BITS: u64 = (1 << 56) - 1;

impl RawSample {
    /// Slot content at power-on, before the first tick.
    pub const POWER_ON: Self = Self::new(1, 1000, 100_000);

    /// Create a sample.
    #[must_use]
    pub const fn new(error_word: u8, temp_c: u16, speed: u32) -> Self {
        Self {
            error_word,
            temp_c,
            speed,
        }
    }

    /// Decoded sensor error word.
    #[must_use]
    pub const fn sensor_status(&self) -> SensorStatus {
        SensorStatus::from_error_word(self.error_word)
    }

    /// Pack into the low 56 bits of a word:
    /// `error_word | temp_c << 8 | speed << 24`.
    #[must_use]
    pub(crate) const fn pack(self) -> u64 {
        (self.error_word as u64)
            | ((self.temp_c as u64) << TEMP_SHIFT)
            | ((self.speed as u64) << SPEED_SHIFT)
    }

    /// Inverse of [`pack`](Self::pack). Bits above 55 are ignored.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn unpack(word: u64) -> Self {
        Self {
            error_word: word as u8,
            temp_c: (word >> TEMP_SHIFT) as u16,
            speed: ((word & SAMPLE_BITS) >> SPEED_SHIFT) as u32,
        }
    }
}
