//! Attacker groups and per-phase aggregation.
//!
//! A unit attacks as one or two groups: the rank and file, and optionally a
//! champion or character with a better profile. Each group rolls against its
//! own threshold; the phase total is the sum over groups.

pub mod request;

pub use request::{AttackMode, AttackReport, AttackRequest, resolve_attack};

use serde::{Deserialize, Serialize};

use crate::dice::DieRoller;
use crate::resolution::{PhaseResult, RerollPolicy, resolve_batch};
use crate::threshold::{Threshold, hit_threshold, wound_threshold};

/// Which roll a phase makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Weapon skill against weapon skill.
    Hit,
    /// Strength against toughness.
    Wound,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "Hits"),
            Self::Wound => write!(f, "Wounds"),
        }
    }
}

/// One group of attackers sharing a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerGroup {
    /// Position of the group within its unit.
    pub index: usize,
    /// Weapon skill, used in the hit phase.
    pub weapon_skill: u32,
    /// Strength including weapon bonuses, used in the wound phase.
    pub strength: u32,
    /// Dice this group rolls in the phase.
    pub attacks: u32,
}

impl AttackerGroup {
    /// Create a group.
    pub fn new(index: usize, weapon_skill: u32, strength: u32, attacks: u32) -> Self {
        Self {
            index,
            weapon_skill,
            strength,
            attacks,
        }
    }

    /// The same group rolling a different number of dice.
    pub fn with_attacks(self, attacks: u32) -> Self {
        Self { attacks, ..self }
    }

    /// The stat this group compares in the given phase.
    pub fn stat_for(&self, kind: PhaseKind) -> u32 {
        match kind {
            PhaseKind::Hit => self.weapon_skill,
            PhaseKind::Wound => self.strength,
        }
    }

    /// Returns true if the group rolls any dice in the given phase.
    pub fn participates_in(&self, kind: PhaseKind) -> bool {
        self.attacks > 0 && self.stat_for(kind) > 0
    }
}

/// The defending unit's stats relevant to being hit and wounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderStats {
    /// Weapon skill, compared in the hit phase.
    pub weapon_skill: u32,
    /// Toughness, compared in the wound phase.
    pub toughness: u32,
}

impl DefenderStats {
    /// Create defender stats.
    pub fn new(weapon_skill: u32, toughness: u32) -> Self {
        Self {
            weapon_skill,
            toughness,
        }
    }

    /// The threshold `group` needs in the given phase.
    pub fn threshold_for(&self, group: &AttackerGroup, kind: PhaseKind) -> Threshold {
        match kind {
            PhaseKind::Hit => hit_threshold(group.weapon_skill, self.weapon_skill),
            PhaseKind::Wound => wound_threshold(group.strength, self.toughness),
        }
    }
}

/// One phase's results across all participating attacker groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedPhaseResult {
    /// Hit or wound phase.
    pub kind: PhaseKind,
    /// Per-group results, in group order. Non-participating groups are absent.
    pub groups: Vec<PhaseResult>,
    /// Successes summed over all groups.
    pub total_successes: u32,
}

impl GroupedPhaseResult {
    /// A phase in which nobody rolled.
    pub fn empty(kind: PhaseKind) -> Self {
        Self {
            kind,
            groups: Vec::new(),
            total_successes: 0,
        }
    }

    /// Successes for one attacker group, or 0 if it did not roll.
    pub fn successes_for(&self, group_index: usize) -> u32 {
        self.group(group_index).map_or(0, |g| g.success_count)
    }

    /// The result for one attacker group, if it rolled.
    pub fn group(&self, group_index: usize) -> Option<&PhaseResult> {
        self.groups.iter().find(|g| g.group_index == group_index)
    }

    /// Total dice rolled across groups (not counting rerolls).
    pub fn dice_rolled(&self) -> usize {
        self.groups.iter().map(PhaseResult::dice_rolled).sum()
    }
}

/// Resolve one phase for every participating attacker group.
///
/// Groups with no attacks, or with a zero stat for this phase, are skipped
/// without touching the roller.
pub fn resolve_phase(
    kind: PhaseKind,
    groups: &[AttackerGroup],
    defender: &DefenderStats,
    policy: &RerollPolicy,
    roller: &mut dyn DieRoller,
) -> GroupedPhaseResult {
    let results: Vec<PhaseResult> = groups
        .iter()
        .filter(|group| group.participates_in(kind))
        .map(|group| {
            let threshold = defender.threshold_for(group, kind);
            resolve_batch(group.index, threshold, policy, roller, group.attacks)
        })
        .collect();
    let total_successes = results.iter().map(|r| r.success_count).sum();

    GroupedPhaseResult {
        kind,
        groups: results,
        total_successes,
    }
}
