//! Consecutive filter-error debounce.

use airdata_faults::FaultCode;

/// Outcome of recording one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceDecision {
    /// The pass succeeded; the streak is back to zero.
    Clear,
    /// The pass failed but the streak is within tolerance.
    Tolerated {
        /// Consecutive failures including this one.
        streak: u32,
    },
    /// The streak exceeds the tolerance; report `FilterError`.
    Escalate {
        /// Consecutive failures including this one.
        streak: u32,
    },
}

impl DebounceDecision {
    /// True if the fault must be reported.
    #[must_use]
    pub const fn escalates(self) -> bool {
        matches!(self, DebounceDecision::Escalate { .. })
    }
}

/// Counts consecutive failed filter passes.
///
/// A failure increments the streak, saturating. A success resets it. Every
/// failure while the streak exceeds the tolerance escalates, so a persistent
/// sensor error is reported on each pass after the threshold.
///
/// ```rust
/// use airdata_faults::FaultCode;
/// use airdata_pipeline::{DebounceDecision, FilterErrorDebounce};
///
/// let mut debounce = FilterErrorDebounce::new(2);
/// let fail = Some(FaultCode::FilterError);
///
/// assert_eq!(debounce.record(fail), DebounceDecision::Tolerated { streak: 1 });
/// assert_eq!(debounce.record(fail), DebounceDecision::Tolerated { streak: 2 });
/// assert_eq!(debounce.record(fail), DebounceDecision::Escalate { streak: 3 });
/// assert_eq!(debounce.record(None), DebounceDecision::Clear);
/// assert_eq!(debounce.longest_streak(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterErrorDebounce {
    tolerance: u32,
    streak: u32,
    longest: u32,
}

impl Default for FilterErrorDebounce {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl FilterErrorDebounce {
    /// Consecutive failures tolerated by default.
    pub const DEFAULT_TOLERANCE: u32 = 5;

    /// Create a debounce that escalates once the streak exceeds `tolerance`.
    #[must_use]
    pub const fn new(tolerance: u32) -> Self {
        Self {
            tolerance,
            streak: 0,
            longest: 0,
        }
    }

    /// Record the result of one filter pass.
    pub fn record(&mut self, fault: Option<FaultCode>) -> DebounceDecision {
        if fault.is_none() {
            self.streak = 0;
            return DebounceDecision::Clear;
        }

        self.streak = self.streak.saturating_add(1);
        self.longest = self.longest.max(self.streak);

        if self.streak > self.tolerance {
            DebounceDecision::Escalate {
                streak: self.streak,
            }
        } else {
            DebounceDecision::Tolerated {
                streak: self.streak,
            }
        }
    }

    /// Current streak.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Longest streak seen since creation.
    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        self.longest
    }

    /// Configured tolerance.
    #[must_use]
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAIL: Option<FaultCode> = Some(FaultCode::FilterError);

    #[test]
    fn test_five_failures_then_success_never_escalates() {
        let mut debounce = FilterErrorDebounce::default();
        for expected in 1..=5 {
            assert_eq!(
                debounce.record(FAIL),
                DebounceDecision::Tolerated { streak: expected }
            );
        }
        assert_eq!(debounce.record(None), DebounceDecision::Clear);
        assert_eq!(debounce.streak(), 0);
    }

    #[test]
    fn test_sixth_failure_escalates() {
        let mut debounce = FilterErrorDebounce::default();
        let decisions: Vec<_> = (0..6).map(|_| debounce.record(FAIL)).collect();

        let escalations = decisions.iter().filter(|d| d.escalates()).count();
        assert_eq!(escalations, 1);
        assert_eq!(decisions.last(), Some(&DebounceDecision::Escalate { streak: 6 }));
    }

    #[test]
    fn test_persistent_failure_escalates_every_pass() {
        let mut debounce = FilterErrorDebounce::new(1);
        assert!(!debounce.record(FAIL).escalates());
        assert!(debounce.record(FAIL).escalates());
        assert!(debounce.record(FAIL).escalates());
        assert_eq!(debounce.longest_streak(), 3);
    }

    #[test]
    fn test_streak_saturates() {
        let mut debounce = FilterErrorDebounce {
            tolerance: 5,
            streak: u32::MAX,
            longest: u32::MAX,
        };
        assert_eq!(
            debounce.record(FAIL),
            DebounceDecision::Escalate { streak: u32::MAX }
        );
    }

    #[test]
    fn test_success_clears_streak_but_keeps_longest() {
        let mut debounce = FilterErrorDebounce::new(3);
        debounce.record(FAIL);
        debounce.record(FAIL);
        assert_eq!(debounce.record(None), DebounceDecision::Clear);
        assert_eq!(debounce.streak(), 0);
        assert_eq!(debounce.longest_streak(), 2);
        assert_eq!(debounce.tolerance(), 3);
    }
}
