//! Rolling dice against a threshold.
//!
//! - [`reroll`]: which dice get a second roll, and whether that roll counts
//! - [`roll`]: one die against a threshold, producing a [`RollRecord`]
//! - [`batch`]: many independent dice for one attacker group

pub mod batch;
pub mod reroll;
pub mod roll;

pub use batch::{PhaseResult, resolve_batch};
pub use reroll::{RerollPolicy, RerollReason, SuccessCounting};
pub use roll::{RollRecord, resolve_roll};

use serde::{Deserialize, Serialize};

/// Whether a single die met its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollOutcome {
    /// The face met the threshold.
    Success,
    /// The face fell short, or the threshold was impossible.
    Failure,
}

impl RollOutcome {
    /// Classify a boolean check.
    pub fn from_success(success: bool) -> Self {
        if success { Self::Success } else { Self::Failure }
    }

    /// Returns true for [`RollOutcome::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}
