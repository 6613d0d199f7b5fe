//! Fault codes, severities, and escalation actions.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw code reported when a pipeline stage completed without a fault.
pub const NO_FAULT: u8 = 0;

/// Faults raised by the acquisition pipeline.
///
/// The set is closed. Success is not a variant: stages return `Option<FaultCode>`
/// or `Result<_, FaultCode>` and the raw code `0` ([`NO_FAULT`]) stands for `None`
/// when a numeric representation is needed.
///
/// # Examples
///
/// ```
/// use airdata_faults::FaultCode;
///
/// assert_eq!(FaultCode::FilterError.code(), 2);
/// assert_eq!(FaultCode::from_code(4), Some(FaultCode::CompensateRangeOverflow));
/// assert_eq!(FaultCode::from_code(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FaultCode {
    /// The sampler produced a new sample before the previous one was consumed.
    Overrun = 1,
    /// The sensor flagged the sample with a non-zero error word.
    FilterError = 2,
    /// Temperature compensation was asked to divide by a zero temperature.
    CompensateDivideByZero = 3,
    /// The compensated temperature does not fit its 16-bit field.
    CompensateRangeOverflow = 4,
}

impl FaultCode {
    /// Every fault code, ordered by numeric code.
    pub const ALL: [FaultCode; 4] = [
        FaultCode::Overrun,
        FaultCode::FilterError,
        FaultCode::CompensateDivideByZero,
        FaultCode::CompensateRangeOverflow,
    ];

    /// Numeric fault code (1..=4).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric fault code.
    ///
    /// Returns `None` for [`NO_FAULT`] and for codes outside the taxonomy.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FaultCode::Overrun),
            2 => Some(FaultCode::FilterError),
            3 => Some(FaultCode::CompensateDivideByZero),
            4 => Some(FaultCode::CompensateRangeOverflow),
            _ => None,
        }
    }

    /// Numeric code of an optional fault, [`NO_FAULT`] for `None`.
    ///
    /// ```
    /// use airdata_faults::{FaultCode, NO_FAULT};
    ///
    /// assert_eq!(FaultCode::to_raw(None), NO_FAULT);
    /// assert_eq!(FaultCode::to_raw(Some(FaultCode::Overrun)), 1);
    /// ```
    #[must_use]
    pub const fn to_raw(fault: Option<FaultCode>) -> u8 {
        match fault {
            Some(code) => code.code(),
            None => NO_FAULT,
        }
    }

    /// Severity used by the fault sink to pick its action.
    #[must_use]
    pub const fn severity(self) -> FaultSeverity {
        match self {
            FaultCode::Overrun => FaultSeverity::Warning,
            FaultCode::FilterError => FaultSeverity::Critical,
            FaultCode::CompensateDivideByZero => FaultSeverity::Critical,
            FaultCode::CompensateRangeOverflow => FaultSeverity::Critical,
        }
    }

    /// Action the external fault handler is expected to take.
    #[must_use]
    pub const fn action(self) -> FaultAction {
        match self.severity() {
            FaultSeverity::Warning => FaultAction::LogAndContinue,
            FaultSeverity::Critical => FaultAction::SafeState,
        }
    }

    /// True for faults the orchestrator tolerates for a bounded streak before
    /// escalating. All other faults escalate on first occurrence.
    #[must_use]
    pub const fn is_debounced(self) -> bool {
        matches!(self, FaultCode::FilterError)
    }

    /// True for faults raised by the temperature compensation guard.
    #[must_use]
    pub const fn is_numeric_guard(self) -> bool {
        matches!(
            self,
            FaultCode::CompensateDivideByZero | FaultCode::CompensateRangeOverflow
        )
    }

    /// Short stable identifier, suitable for structured log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FaultCode::Overrun => "overrun",
            FaultCode::FilterError => "filter_error",
            FaultCode::CompensateDivideByZero => "compensate_divide_by_zero",
            FaultCode::CompensateRangeOverflow => "compensate_range_overflow",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultCode::Overrun => write!(f, "Sample overrun: previous sample not consumed"),
            FaultCode::FilterError => write!(f, "Air data filter reported a sensor error"),
            FaultCode::CompensateDivideByZero => {
                write!(f, "Temperature compensation divide by zero")
            }
            FaultCode::CompensateRangeOverflow => {
                write!(f, "Compensated temperature out of 16-bit range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FaultCode {}

/// Fault severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaultSeverity {
    /// Timing or data-quality problem; operation may continue.
    Warning,
    /// Invalid data would reach downstream consumers.
    Critical,
}

impl fmt::Display for FaultSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultSeverity::Warning => write!(f, "warning"),
            FaultSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Action the fault handler takes for an escalated fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaultAction {
    /// Record the fault and keep the control loop running.
    LogAndContinue,
    /// Turn off critical equipment and hold it in a safe state.
    SafeState,
}

impl FaultAction {
    /// Returns true if the control loop keeps running after this action.
    #[must_use]
    pub const fn allows_operation(self) -> bool {
        matches!(self, FaultAction::LogAndContinue)
    }
}
