//! Status word decoding for the type 54c airspeed sensor.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded sensor error word.
///
/// Only used for diagnostics. Any non-zero word, known or not, fails the
/// filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorStatus {
    /// Error word 0.
    Ok,
    /// Colder than the minimum operating temperature.
    BelowMinTemperature,
    /// Hotter than the maximum operating temperature.
    AboveMaxTemperature,
    /// Sensor lost power.
    PowerLoss,
    /// Sensor calibration failed.
    CalibrationFailed,
    /// Error word outside the documented set.
    Unknown(u8),
}

impl SensorStatus {
    /// Decode a raw error word.
    ///
    /// ```
    /// use airdata_faults::SensorStatus;
    ///
    /// assert_eq!(SensorStatus::from_error_word(0), SensorStatus::Ok);
    /// assert_eq!(SensorStatus::from_error_word(3), SensorStatus::PowerLoss);
    /// assert_eq!(SensorStatus::from_error_word(9), SensorStatus::Unknown(9));
    /// ```
    #[must_use]
    pub const fn from_error_word(word: u8) -> Self {
        match word {
            0 => SensorStatus::Ok,
            1 => SensorStatus::BelowMinTemperature,
            2 => SensorStatus::AboveMaxTemperature,
            3 => SensorStatus::PowerLoss,
            4 => SensorStatus::CalibrationFailed,
            other => SensorStatus::Unknown(other),
        }
    }

    /// Raw error word.
    #[must_use]
    pub const fn error_word(self) -> u8 {
        match self {
            SensorStatus::Ok => 0,
            SensorStatus::BelowMinTemperature => 1,
            SensorStatus::AboveMaxTemperature => 2,
            SensorStatus::PowerLoss => 3,
            SensorStatus::CalibrationFailed => 4,
            SensorStatus::Unknown(word) => word,
        }
    }

    /// True when the sensor reported no error.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, SensorStatus::Ok)
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorStatus::Ok => write!(f, "ok"),
            SensorStatus::BelowMinTemperature => write!(f, "colder than min temp"),
            SensorStatus::AboveMaxTemperature => write!(f, "hotter than max temp"),
            SensorStatus::PowerLoss => write!(f, "loss of power"),
            SensorStatus::CalibrationFailed => write!(f, "calibration failed"),
            SensorStatus::Unknown(word) => write!(f, "unknown error word {word}"),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[quickcheck_macros::quickcheck]
    fn prop_error_word_round_trips(word: u8) -> bool {
        SensorStatus::from_error_word(word).error_word() == word
    }

    #[quickcheck_macros::quickcheck]
    fn prop_only_zero_is_ok(word: u8) -> bool {
        SensorStatus::from_error_word(word).is_ok() == (word == 0)
    }
}
