//! Temperature compensation with divide and range guards.

use crate::filter::FilteredSample;
use airdata_faults::FaultCode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of the compensation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompensatedSample {
    /// Sensor error word.
    pub error_word: u8,
    /// Compensated temperature, `speed / filtered temp`.
    pub temp_c: u16,
    /// Airspeed.
    pub speed: u32,
}

impl CompensatedSample {
    /// Content before the first successful compensation.
    pub const POWER_ON: Self = Self::new(1, 1000, 1_000_000);

    /// Create a compensated sample.
    #[must_use]
    pub const fn new(error_word: u8, temp_c: u16, speed: u32) -> Self {
        Self {
            error_word,
            temp_c,
            speed,
        }
    }
}

impl Default for CompensatedSample {
    fn default() -> Self {
        Self::POWER_ON
    }
}

/// Compensate a filtered sample.
///
/// Computes `speed / temp_c` in 32-bit unsigned arithmetic, truncating.
///
/// # Errors
///
/// - [`FaultCode::CompensateDivideByZero`] if the filtered temperature is 0
/// - [`FaultCode::CompensateRangeOverflow`] if the quotient exceeds `u16::MAX`
///
/// ```rust
/// use airdata_faults::FaultCode;
/// use airdata_pipeline::{CompensatedSample, FilteredSample, compensate};
///
/// let out = compensate(&FilteredSample::new(0, 1003, 100_000));
/// assert_eq!(out, Ok(CompensatedSample::new(0, 99, 100_000)));
///
/// let out = compensate(&FilteredSample::new(0, 1, 700_000_000));
/// assert_eq!(out, Err(FaultCode::CompensateRangeOverflow));
/// ```
#[inline]
pub fn compensate(filtered: &FilteredSample) -> Result<CompensatedSample, FaultCode> {
    let quotient = filtered
        .speed
        .checked_div(filtered.temp_c)
        .ok_or(FaultCode::CompensateDivideByZero)?;
    let Ok(temp_c) = u16::try_from(quotient) else {
        return Err(FaultCode::CompensateRangeOverflow);
    };

    Ok(CompensatedSample {
        error_word: filtered.error_word,
        temp_c,
        speed: filtered.speed,
    })
}

/// Compensate into an existing output.
///
/// On error `out` is left exactly as it was.
///
/// # Errors
///
/// Same as [`compensate`].
#[inline]
pub fn compensate_into(
    filtered: &FilteredSample,
    out: &mut CompensatedSample,
) -> Result<(), FaultCode> {
    *out = compensate(filtered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_compensation() {
        let filtered = FilteredSample::new(0, 1003, 100_000);
        assert_eq!(
            compensate(&filtered),
            Ok(CompensatedSample::new(0, 99, 100_000))
        );
    }

    #[test]
    fn test_divide_by_zero_leaves_output_unchanged() {
        let mut out = CompensatedSample::new(7, 42, 4242);
        let result = compensate_into(&FilteredSample::new(0, 0, 100), &mut out);

        assert_eq!(result, Err(FaultCode::CompensateDivideByZero));
        assert_eq!(out, CompensatedSample::new(7, 42, 4242));
    }

    #[test]
    fn test_range_overflow_leaves_output_unchanged() {
        let mut out = CompensatedSample::POWER_ON;
        let result = compensate_into(&FilteredSample::new(0, 1, 700_000_000), &mut out);

        assert_eq!(result, Err(FaultCode::CompensateRangeOverflow));
        assert_eq!(out, CompensatedSample::POWER_ON);
    }

    #[test]
    fn test_range_boundary() {
        let at_max = FilteredSample::new(0, 1, u32::from(u16::MAX));
        assert_eq!(compensate(&at_max).map(|c| c.temp_c), Ok(u16::MAX));

        let past_max = FilteredSample::new(0, 1, u32::from(u16::MAX) + 1);
        assert_eq!(
            compensate(&past_max),
            Err(FaultCode::CompensateRangeOverflow)
        );
    }

    #[test]
    fn test_error_word_passes_through() {
        let filtered = FilteredSample::new(4, 10, 1000);
        assert_eq!(
            compensate(&filtered),
            Ok(CompensatedSample::new(4, 100, 1000))
        );
    }

    #[test]
    fn test_power_on_output() {
        assert_eq!(
            CompensatedSample::default(),
            CompensatedSample::new(1, 1000, 1_000_000)
        );
    }

    #[quickcheck_macros::quickcheck]
    fn prop_compensate_into_matches_compensate(error_word: u8, temp_c: u32, speed: u32) -> bool {
        let filtered = FilteredSample::new(error_word, temp_c, speed);
        let before = CompensatedSample::new(9, 9, 9);
        let mut out = before;

        match (compensate(&filtered), compensate_into(&filtered, &mut out)) {
            (Ok(expected), Ok(())) => out == expected,
            (Err(a), Err(b)) => a == b && out == before,
            _ => false,
        }
    }
}
