//! Resolving a single die.

use serde::{Deserialize, Serialize};

use super::{RerollPolicy, RerollReason, RollOutcome, SuccessCounting};
use crate::dice::DieRoller;
use crate::threshold::Threshold;

/// Everything that happened to one die, including any reroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    /// The first face rolled.
    pub first_roll: u8,
    /// Whether the first face met the threshold.
    pub first_outcome: RollOutcome,
    /// The rerolled face, present only when a reroll fired.
    pub second_roll: Option<u8>,
    /// Whether the rerolled face met the threshold.
    pub second_outcome: Option<RollOutcome>,
    /// The policy flag that fired.
    pub reroll_reason: Option<RerollReason>,
    /// Whether this die counts as a success once rerolls are settled.
    pub success: bool,
    /// The first face decided the outcome even though a reroll fired.
    #[serde(default)]
    pub kept_original: bool,
}

impl RollRecord {
    /// Returns true if the die was rolled a second time.
    pub fn reroll_applied(&self) -> bool {
        self.reroll_reason.is_some()
    }

    /// The face that decided the final outcome.
    ///
    /// This is the reroll, unless the policy kept an original success.
    pub fn deciding_roll(&self) -> u8 {
        match self.second_roll {
            Some(second) if !self.kept_original => second,
            _ => self.first_roll,
        }
    }
}

impl std::fmt::Display for RollRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.second_roll {
            Some(second) => write!(f, "{}->{}", self.first_roll, second),
            None => write!(f, "{}", self.first_roll),
        }
    }
}

/// Roll one die against `threshold`, applying at most one reroll.
///
/// The die is rolled even when the threshold is impossible, so every record
/// carries a face to display.
pub fn resolve_roll(
    threshold: Threshold,
    policy: &RerollPolicy,
    roller: &mut dyn DieRoller,
) -> RollRecord {
    let first_roll = roller.roll_d6();
    let first_outcome = RollOutcome::from_success(threshold.is_met_by(first_roll));

    let Some(reason) = policy.trigger(first_roll, first_outcome) else {
        return RollRecord {
            first_roll,
            first_outcome,
            second_roll: None,
            second_outcome: None,
            reroll_reason: None,
            success: first_outcome.is_success(),
            kept_original: false,
        };
    };

    let second_roll = roller.roll_d6();
    let second_outcome = RollOutcome::from_success(threshold.is_met_by(second_roll));

    let kept_original = reason == RerollReason::Successes
        && policy.success_counting == SuccessCounting::KeepOriginal;
    let success = if kept_original {
        first_outcome.is_success()
    } else {
        second_outcome.is_success()
    };

    RollRecord {
        first_roll,
        first_outcome,
        second_roll: Some(second_roll),
        second_outcome: Some(second_outcome),
        reroll_reason: Some(reason),
        success,
        kept_original,
    }
}
