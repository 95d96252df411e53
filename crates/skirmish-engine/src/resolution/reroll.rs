//! Reroll policies.
//!
//! A policy holds three independent flags, consulted in a fixed order:
//! ones, then failures, then successes. The first flag whose condition holds
//! for the first roll fires; a die is never rerolled twice.

use serde::{Deserialize, Serialize};

use super::RollOutcome;

/// Which policy flag caused a reroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RerollReason {
    /// A failed natural 1 was rerolled.
    Ones,
    /// A failed roll was rerolled.
    Failures,
    /// A successful roll was rerolled.
    Successes,
}

impl std::fmt::Display for RerollReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ones => write!(f, "reroll 1s"),
            Self::Failures => write!(f, "reroll failures"),
            Self::Successes => write!(f, "reroll successes"),
        }
    }
}

/// How a rerolled success is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessCounting {
    /// The reroll's outcome replaces the original success.
    #[default]
    UseReroll,
    /// The original success stands; the reroll is recorded but ignored.
    KeepOriginal,
}

/// Reroll rules for one phase (hits or wounds).
///
/// Every flag defaults to off, so `RerollPolicy::default()` never rerolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RerollPolicy {
    /// Reroll failed natural 1s.
    pub reroll_ones: bool,
    /// Reroll any failed roll.
    pub reroll_failures: bool,
    /// Reroll successful rolls.
    pub reroll_successes: bool,
    /// How a rerolled success is counted.
    pub success_counting: SuccessCounting,
}

impl RerollPolicy {
    /// A policy that never rerolls.
    pub fn none() -> Self {
        Self::default()
    }

    /// Enable or disable rerolling failed 1s.
    pub fn with_reroll_ones(mut self, enabled: bool) -> Self {
        self.reroll_ones = enabled;
        self
    }

    /// Enable or disable rerolling failures.
    pub fn with_reroll_failures(mut self, enabled: bool) -> Self {
        self.reroll_failures = enabled;
        self
    }

    /// Enable or disable rerolling successes.
    pub fn with_reroll_successes(mut self, enabled: bool) -> Self {
        self.reroll_successes = enabled;
        self
    }

    /// Choose how rerolled successes are counted.
    pub fn with_success_counting(mut self, counting: SuccessCounting) -> Self {
        self.success_counting = counting;
        self
    }

    /// Returns true if no flag is set.
    pub fn is_empty(&self) -> bool {
        !(self.reroll_ones || self.reroll_failures || self.reroll_successes)
    }

    /// The flag that fires for a first roll, if any.
    pub fn trigger(&self, face: u8, outcome: RollOutcome) -> Option<RerollReason> {
        let failed = outcome == RollOutcome::Failure;
        if self.reroll_ones && failed && face == 1 {
            Some(RerollReason::Ones)
        } else if self.reroll_failures && failed {
            Some(RerollReason::Failures)
        } else if self.reroll_successes && !failed {
            Some(RerollReason::Successes)
        } else {
            None
        }
    }
}
