//! Input validation at the engine boundary.
//!
//! Resolution itself never fails, so every range check happens here, before
//! any die is rolled. Checks collect [`ValidationIssue`]s; errors reject the
//! input, warnings only flag matchups that are legal but hopeless.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::attack::{AttackerGroup, DefenderStats, PhaseKind};
use crate::error::{EngineError, EngineResult};
use crate::threshold::Threshold;
use crate::unit::UnitProfile;

/// Accepted range for weapon skill, strength, toughness, initiative and attacks.
pub const STAT_RANGE: RangeInclusive<u32> = 1..=10;

/// Most dice a single group may roll in one phase.
pub const MAX_ATTACKS: u32 = 1000;

/// Most attacker groups a unit may field.
pub const MAX_GROUPS: usize = 2;

/// Most models that may fight in a unit's front rank.
pub const MAX_FRONTAGE: u32 = 50;

/// Most trials a single run may request.
pub const MAX_TRIALS: u32 = 1_000_000;

/// A problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What the issue is about (e.g. "defender", "group 1", a unit name).
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this rejects the input (true) or is only a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Turn collected issues into a result, failing on the first batch of errors.
pub fn ensure_valid(issues: &[ValidationIssue]) -> EngineResult<()> {
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error)
        .map(|i| format!("{}: {}", i.subject, i.message))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(EngineError::InvalidInput(errors.join("; ")))
    }
}

fn check_stat(subject: &str, stat: &str, value: u32, issues: &mut Vec<ValidationIssue>) {
    if !STAT_RANGE.contains(&value) {
        issues.push(ValidationIssue::error(
            subject,
            format!(
                "{stat} {value} is outside {}..={}",
                STAT_RANGE.start(),
                STAT_RANGE.end()
            ),
        ));
    }
}

/// Validate the defender's stats.
pub fn validate_defender(defender: &DefenderStats) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_stat("defender", "weapon skill", defender.weapon_skill, &mut issues);
    check_stat("defender", "toughness", defender.toughness, &mut issues);
    issues
}

/// Validate attacker groups for the phases they will roll in.
///
/// A group with no attacks, or a zero stat for a phase, sits that phase out
/// and is not range-checked for it.
pub fn validate_groups(
    groups: &[AttackerGroup],
    defender: &DefenderStats,
    kinds: &[PhaseKind],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if groups.len() > MAX_GROUPS {
        issues.push(ValidationIssue::error(
            "attackers",
            format!("{} groups given, at most {MAX_GROUPS} allowed", groups.len()),
        ));
    }

    let mut seen = BTreeSet::new();
    for group in groups {
        let subject = format!("group {}", group.index + 1);

        if !seen.insert(group.index) {
            issues.push(ValidationIssue::error(&subject, "index is used by more than one group"));
        }

        if group.attacks > MAX_ATTACKS {
            issues.push(ValidationIssue::error(
                &subject,
                format!("{} attacks exceeds the limit of {MAX_ATTACKS}", group.attacks),
            ));
        }

        for &kind in kinds {
            if !group.participates_in(kind) {
                continue;
            }
            match kind {
                PhaseKind::Hit => {
                    check_stat(&subject, "weapon skill", group.weapon_skill, &mut issues);
                }
                PhaseKind::Wound => {
                    check_stat(&subject, "strength", group.strength, &mut issues);
                    if defender.threshold_for(group, kind) == Threshold::Impossible {
                        issues.push(ValidationIssue::warning(
                            &subject,
                            format!(
                                "strength {} cannot wound toughness {}",
                                group.strength, defender.toughness
                            ),
                        ));
                    }
                }
            }
        }
    }

    issues
}

/// Validate a unit profile before it fights.
pub fn validate_profile(profile: &UnitProfile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let subject = profile.name.as_str();
    let stats = &profile.characteristics;

    check_stat(subject, "weapon skill", stats.weapon_skill, &mut issues);
    check_stat(subject, "strength", stats.strength, &mut issues);
    check_stat(subject, "toughness", stats.toughness, &mut issues);
    check_stat(subject, "initiative", stats.initiative, &mut issues);
    check_stat(subject, "attacks", stats.attacks, &mut issues);

    if profile.frontage == 0 || profile.frontage > MAX_FRONTAGE {
        issues.push(ValidationIssue::error(
            subject,
            format!("frontage {} is outside 1..={MAX_FRONTAGE}", profile.frontage),
        ));
    }

    if profile.champion.is_some() {
        let champion = profile.champion_characteristics();
        let champion_subject = format!("{subject} champion");
        check_stat(&champion_subject, "weapon skill", champion.weapon_skill, &mut issues);
        check_stat(&champion_subject, "strength", champion.strength, &mut issues);
        check_stat(&champion_subject, "attacks", champion.attacks, &mut issues);
    }

    if profile.total_attacks() > MAX_ATTACKS {
        issues.push(ValidationIssue::error(
            subject,
            format!(
                "{} total attacks exceeds the limit of {MAX_ATTACKS}",
                profile.total_attacks()
            ),
        ));
    }

    issues
}

/// Validate a requested number of trials.
pub fn validate_trial_count(trials: u32) -> Vec<ValidationIssue> {
    if trials == 0 || trials > MAX_TRIALS {
        vec![ValidationIssue::error(
            "trials",
            format!("{trials} trials is outside 1..={MAX_TRIALS}"),
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Characteristics, ProfileOverlay, Stat};

    fn errors(issues: &[ValidationIssue]) -> usize {
        issues.iter().filter(|i| i.is_error).count()
    }

    #[test]
    fn defender_in_range() {
        assert!(validate_defender(&DefenderStats::new(3, 4)).is_empty());
        let issues = validate_defender(&DefenderStats::new(0, 11));
        assert_eq!(errors(&issues), 2);
        assert!(ensure_valid(&issues).is_err());
    }

    #[test]
    fn absent_group_is_not_checked() {
        let defender = DefenderStats::new(3, 3);
        let groups = [AttackerGroup::new(0, 4, 4, 10), AttackerGroup::new(1, 0, 0, 0)];
        let issues = validate_groups(&groups, &defender, &[PhaseKind::Hit, PhaseKind::Wound]);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn too_many_groups() {
        let defender = DefenderStats::new(3, 3);
        let groups = [
            AttackerGroup::new(0, 4, 4, 1),
            AttackerGroup::new(1, 4, 4, 1),
            AttackerGroup::new(2, 4, 4, 1),
        ];
        let issues = validate_groups(&groups, &defender, &[PhaseKind::Hit]);
        assert_eq!(errors(&issues), 1);
    }

    #[test]
    fn duplicate_group_indices() {
        let defender = DefenderStats::new(3, 3);
        let group = AttackerGroup::new(0, 4, 4, 2);
        let issues = validate_groups(&[group, group], &defender, &[PhaseKind::Hit]);
        assert_eq!(errors(&issues), 1);
        assert!(issues[0].message.contains("more than one group"));
    }

    #[test]
    fn out_of_range_stats_and_attacks() {
        let defender = DefenderStats::new(3, 3);
        let groups = [AttackerGroup::new(0, 12, 4, MAX_ATTACKS + 1)];
        let issues = validate_groups(&groups, &defender, &[PhaseKind::Hit]);
        assert_eq!(errors(&issues), 2);
        let message = ensure_valid(&issues).unwrap_err().to_string();
        assert!(message.contains("group 1"), "{message}");
    }

    #[test]
    fn hopeless_wounds_only_warn() {
        let defender = DefenderStats::new(3, 9);
        let groups = [AttackerGroup::new(0, 3, 3, 5)];
        let issues = validate_groups(&groups, &defender, &[PhaseKind::Wound]);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert!(ensure_valid(&issues).is_ok());
        assert!(issues[0].to_string().starts_with("warning: group 1"));
    }

    #[test]
    fn profile_checks() {
        let mut profile = UnitProfile::new(
            "Militia",
            Characteristics {
                weapon_skill: 3,
                strength: 3,
                toughness: 3,
                initiative: 3,
                attacks: 1,
            },
        );
        assert!(validate_profile(&profile).is_empty());

        profile.frontage = 0;
        assert_eq!(errors(&validate_profile(&profile)), 1);

        profile.frontage = 5;
        profile.champion = Some(ProfileOverlay::new().with(Stat::WeaponSkill, 9));
        let issues = validate_profile(&profile);
        assert_eq!(errors(&issues), 1);
        assert_eq!(issues[0].subject, "Militia champion");
    }

    #[test]
    fn trial_counts() {
        assert!(validate_trial_count(1).is_empty());
        assert!(validate_trial_count(10_000).is_empty());
        assert_eq!(errors(&validate_trial_count(0)), 1);
        assert_eq!(errors(&validate_trial_count(MAX_TRIALS + 1)), 1);
    }
}
