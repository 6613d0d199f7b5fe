//! Configuration error types

use core::fmt;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Pipeline configuration errors.
///
/// Runtime faults are not errors in this sense; they travel as
/// [`FaultCode`](airdata_faults::FaultCode) values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Tick period outside the supported range
    #[error("Tick period {0} us outside supported range 1000..=1000000 us")]
    TickPeriodOutOfRange(u32),

    /// Filter error tolerance of zero
    #[error("Filter error tolerance must be at least 1")]
    ZeroFilterErrorTolerance,

    /// Temperature scale with a zero numerator
    #[error("Temperature scale numerator must be non-zero")]
    ZeroScaleNumerator,

    /// Temperature scale with a zero denominator
    #[error("Temperature scale denominator must be non-zero")]
    ZeroScaleDenominator,

    /// Configuration document could not be parsed
    #[error("Invalid pipeline configuration document: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Create a parse error with context
    pub fn parse_failed(context: impl fmt::Display) -> Self {
        ConfigError::Parse(context.to_string())
    }

    /// Check if the error concerns the temperature scale factor
    pub fn is_scale_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ZeroScaleNumerator | ConfigError::ZeroScaleDenominator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ConfigError::TickPeriodOutOfRange(42);
        assert!(e.to_string().contains("42"));
    }

    #[test]
    fn test_scale_errors() {
        assert!(ConfigError::ZeroScaleDenominator.is_scale_error());
        assert!(ConfigError::ZeroScaleNumerator.is_scale_error());
        assert!(!ConfigError::ZeroFilterErrorTolerance.is_scale_error());
    }

    #[test]
    fn test_parse_failed_keeps_context() {
        let e = ConfigError::parse_failed("expected `}` at line 3");
        assert_eq!(
            e.to_string(),
            "Invalid pipeline configuration document: expected `}` at line 3"
        );
    }
}
