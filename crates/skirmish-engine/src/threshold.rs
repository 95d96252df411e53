//! To-hit and to-wound tables.
//!
//! Both tables compare one attacker stat against one defender stat and yield
//! the minimum d6 face needed for success. The wound table can also rule a
//! roll out entirely ([`Threshold::Impossible`]), which is a normal outcome
//! and not an error.

use serde::{Deserialize, Serialize};

use crate::resolution::{RerollPolicy, SuccessCounting};

/// Minimum die face needed for a roll to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Threshold {
    /// Succeeds on 2 or more.
    #[serde(rename = "2+")]
    Two,
    /// Succeeds on 3 or more.
    #[serde(rename = "3+")]
    Three,
    /// Succeeds on 4 or more.
    #[serde(rename = "4+")]
    Four,
    /// Succeeds on 5 or more.
    #[serde(rename = "5+")]
    Five,
    /// Succeeds only on a 6.
    #[serde(rename = "6+")]
    Six,
    /// No face succeeds.
    Impossible,
}

impl Threshold {
    /// The face value to meet, or `None` if no face succeeds.
    pub fn target(self) -> Option<u8> {
        match self {
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
            Self::Six => Some(6),
            Self::Impossible => None,
        }
    }

    /// Returns true if `face` meets this threshold.
    pub fn is_met_by(self, face: u8) -> bool {
        self.target().is_some_and(|target| face >= target)
    }

    /// Chance that a single d6 meets this threshold, before rerolls.
    pub fn probability(self) -> f64 {
        match self.target() {
            Some(target) => f64::from(7 - target) / 6.0,
            None => 0.0,
        }
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{target}+"),
            None => write!(f, "Impossible"),
        }
    }
}

/// Roll needed to hit, comparing attacker and defender weapon skill.
///
/// Twice-plus-one the defender's skill hits on 2+, any advantage on 3+,
/// being outclassed by twice-plus-one on 5+, and everything else on 4+.
pub fn hit_threshold(attacker_skill: u32, defender_skill: u32) -> Threshold {
    let attacker = u64::from(attacker_skill);
    let defender = u64::from(defender_skill);

    if attacker >= defender * 2 + 1 {
        Threshold::Two
    } else if attacker > defender {
        Threshold::Three
    } else if defender >= attacker * 2 + 1 {
        Threshold::Five
    } else {
        Threshold::Four
    }
}

/// Roll needed to wound, comparing attacker strength and defender toughness.
pub fn wound_threshold(strength: u32, toughness: u32) -> Threshold {
    let difference = i64::from(strength) - i64::from(toughness);
    match difference {
        i64::MIN..=-6 => Threshold::Impossible,
        -5..=-2 => Threshold::Six,
        -1 => Threshold::Five,
        0 => Threshold::Four,
        1 => Threshold::Three,
        _ => Threshold::Two,
    }
}

/// Closed-form expected successes for `attacks` dice under a reroll policy.
///
/// A natural 1 always fails, so a ones-reroll recovers one sixth of the dice;
/// a failures-reroll recovers every failed die.
pub fn expected_successes(threshold: Threshold, policy: &RerollPolicy, attacks: u32) -> f64 {
    let p = threshold.probability();

    let kept_successes = if policy.reroll_successes
        && policy.success_counting == SuccessCounting::UseReroll
    {
        p * p
    } else {
        p
    };

    let recovered_failures = if threshold == Threshold::Impossible {
        0.0
    } else if policy.reroll_failures {
        (1.0 - p) * p
    } else if policy.reroll_ones {
        p / 6.0
    } else {
        0.0
    };

    f64::from(attacks) * (kept_successes + recovered_failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_table_rows() {
        assert_eq!(hit_threshold(7, 3), Threshold::Two);
        assert_eq!(hit_threshold(6, 3), Threshold::Three);
        assert_eq!(hit_threshold(4, 3), Threshold::Three);
        assert_eq!(hit_threshold(3, 3), Threshold::Four);
        assert_eq!(hit_threshold(3, 6), Threshold::Four);
        assert_eq!(hit_threshold(3, 7), Threshold::Five);
        assert_eq!(hit_threshold(1, 10), Threshold::Five);
        assert_eq!(hit_threshold(10, 1), Threshold::Two);
    }

    #[test]
    fn wound_table_rows() {
        assert_eq!(wound_threshold(1, 7), Threshold::Impossible);
        assert_eq!(wound_threshold(1, 10), Threshold::Impossible);
        assert_eq!(wound_threshold(2, 7), Threshold::Six);
        assert_eq!(wound_threshold(3, 5), Threshold::Six);
        assert_eq!(wound_threshold(3, 4), Threshold::Five);
        assert_eq!(wound_threshold(4, 4), Threshold::Four);
        assert_eq!(wound_threshold(5, 4), Threshold::Three);
        assert_eq!(wound_threshold(6, 4), Threshold::Two);
        assert_eq!(wound_threshold(10, 1), Threshold::Two);
    }

    #[test]
    fn impossible_is_never_met() {
        for face in 1..=6 {
            assert!(!Threshold::Impossible.is_met_by(face));
        }
        assert!(Threshold::Six.is_met_by(6));
        assert!(!Threshold::Six.is_met_by(5));
    }

    #[test]
    fn display() {
        assert_eq!(Threshold::Two.to_string(), "2+");
        assert_eq!(Threshold::Six.to_string(), "6+");
        assert_eq!(Threshold::Impossible.to_string(), "Impossible");
    }

    #[test]
    fn serializes_as_table_notation() {
        let json = serde_json::to_string(&Threshold::Four).unwrap();
        assert_eq!(json, "\"4+\"");
        let back: Threshold = serde_json::from_str("\"Impossible\"").unwrap();
        assert_eq!(back, Threshold::Impossible);
    }

    #[test]
    fn probabilities() {
        assert!((Threshold::Four.probability() - 0.5).abs() < 1e-12);
        assert!((Threshold::Two.probability() - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(Threshold::Impossible.probability(), 0.0);
    }

    #[test]
    fn expected_successes_with_rerolls() {
        let none = RerollPolicy::none();
        assert!((expected_successes(Threshold::Four, &none, 12) - 6.0).abs() < 1e-9);

        let failures = RerollPolicy::none().with_reroll_failures(true);
        assert!((expected_successes(Threshold::Four, &failures, 12) - 9.0).abs() < 1e-9);

        let ones = RerollPolicy::none().with_reroll_ones(true);
        assert!((expected_successes(Threshold::Four, &ones, 12) - 7.0).abs() < 1e-9);

        let successes = RerollPolicy::none().with_reroll_successes(true);
        assert!((expected_successes(Threshold::Four, &successes, 12) - 3.0).abs() < 1e-9);

        let kept = successes.with_success_counting(SuccessCounting::KeepOriginal);
        assert!((expected_successes(Threshold::Four, &kept, 12) - 6.0).abs() < 1e-9);

        assert_eq!(expected_successes(Threshold::Impossible, &failures, 12), 0.0);
    }
}
