//! Pipeline configuration.

use crate::error::{ConfigError, ConfigResult};
use airdata_acquisition::TICK_PERIOD_US;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact rational scale applied to the raw temperature register.
///
/// Evaluated in 64-bit integer arithmetic and truncated toward zero, so the
/// result never depends on floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleFactor {
    /// Multiplier.
    pub numerator: u32,
    /// Divisor.
    pub denominator: u32,
}

impl ScaleFactor {
    /// The air-data sensor scale, 1.00325.
    pub const AIR_DATA: Self = Self {
        numerator: 4013,
        denominator: 4000,
    };

    /// Identity scale.
    pub const UNITY: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Create a scale factor.
    ///
    /// # Errors
    ///
    /// Returns an error if either term is zero.
    pub fn new(numerator: u32, denominator: u32) -> ConfigResult<Self> {
        let scale = Self {
            numerator,
            denominator,
        };
        scale.validate()?;
        Ok(scale)
    }

    /// Validate both terms.
    ///
    /// # Errors
    ///
    /// Returns an error if either term is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.numerator == 0 {
            return Err(ConfigError::ZeroScaleNumerator);
        }
        if self.denominator == 0 {
            return Err(ConfigError::ZeroScaleDenominator);
        }
        Ok(())
    }

    /// Scale a raw register value, truncating toward zero.
    ///
    /// A zero denominator yields 0 and a result wider than 32 bits saturates.
    #[inline]
    #[must_use]
    pub fn apply(self, raw: u16) -> u32 {
        let product = u64::from(raw).saturating_mul(u64::from(self.numerator));
        let quotient = product
            .checked_div(u64::from(self.denominator))
            .unwrap_or(0);
        u32::try_from(quotient).unwrap_or(u32::MAX)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::AIR_DATA
    }
}

/// Pipeline configuration.
///
/// # Real-Time Safety
///
/// Plain `Copy` data, validated once when the controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Sampling period in microseconds.
    ///
    /// Default: 10 000 µs.
    pub tick_period_us: u32,

    /// Consecutive filter errors tolerated before `FilterError` escalates.
    ///
    /// Default: 5. The sixth consecutive failure is reported.
    pub filter_error_tolerance: u32,

    /// Scale applied to the raw temperature register by the filter.
    pub temp_scale: ScaleFactor,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_period_us: TICK_PERIOD_US,
            filter_error_tolerance: 5,
            temp_scale: ScaleFactor::AIR_DATA,
        }
    }
}

impl PipelineConfig {
    /// Smallest accepted tick period.
    pub const MIN_TICK_PERIOD_US: u32 = 1_000;
    /// Largest accepted tick period.
    pub const MAX_TICK_PERIOD_US: u32 = 1_000_000;

    /// Preset that escalates filter errors after two consecutive failures.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            filter_error_tolerance: 2,
            ..Self::default()
        }
    }

    /// Preset for noisy bench setups: twenty consecutive failures tolerated.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            filter_error_tolerance: 20,
            ..Self::default()
        }
    }

    /// Set the sampling period.
    #[must_use]
    pub fn with_tick_period_us(mut self, tick_period_us: u32) -> Self {
        self.tick_period_us = tick_period_us;
        self
    }

    /// Set the filter error tolerance.
    #[must_use]
    pub fn with_filter_error_tolerance(mut self, tolerance: u32) -> Self {
        self.filter_error_tolerance = tolerance;
        self
    }

    /// Set the temperature scale.
    #[must_use]
    pub fn with_temp_scale(mut self, scale: ScaleFactor) -> Self {
        self.temp_scale = scale;
        self
    }

    /// Sampling period as a [`Duration`].
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_micros(u64::from(self.tick_period_us))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(Self::MIN_TICK_PERIOD_US..=Self::MAX_TICK_PERIOD_US).contains(&self.tick_period_us) {
            return Err(ConfigError::TickPeriodOutOfRange(self.tick_period_us));
        }
        if self.filter_error_tolerance == 0 {
            return Err(ConfigError::ZeroFilterErrorTolerance);
        }
        self.temp_scale.validate()
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::parse_failed)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(ConfigError::parse_failed)
    }
}
