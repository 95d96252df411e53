//! One round of close combat between two units.
//!
//! The unit with the higher initiative strikes first. Its wounds remove
//! attacks from the other side before that side strikes back.

pub mod sequencer;

pub use sequencer::{CombatSequencer, CombatState};

use serde::{Deserialize, Serialize};

use crate::attack::{AttackerGroup, GroupedPhaseResult};
use crate::dice::DieRoller;
use crate::error::EngineResult;
use crate::resolution::RerollPolicy;
use crate::unit::UnitProfile;

/// Which of the caller's two units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The unit the caller named as attacker.
    Attacker,
    /// The unit the caller named as defender.
    Defender,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attacker => write!(f, "attacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}

/// Who strikes first in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeOrder {
    /// The side that strikes first.
    pub first: Side,
    /// Whether the initiatives were equal.
    pub tied: bool,
}

impl InitiativeOrder {
    /// Order two units by initiative, descending. Ties go to the attacker.
    pub fn decide(attacker_initiative: u32, defender_initiative: u32) -> Self {
        let first = if defender_initiative > attacker_initiative {
            Side::Defender
        } else {
            Side::Attacker
        };
        Self {
            first,
            tied: attacker_initiative == defender_initiative,
        }
    }

    /// The side that strikes back.
    pub fn second(&self) -> Side {
        self.first.other()
    }
}

/// Reroll policies for a combat round, one per phase kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundPolicies {
    /// Rerolls applied to every hit roll.
    pub hit: RerollPolicy,
    /// Rerolls applied to every wound roll.
    pub wound: RerollPolicy,
}

impl RoundPolicies {
    /// No rerolls in either phase.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the hit-phase policy.
    pub fn with_hit(mut self, policy: RerollPolicy) -> Self {
        self.hit = policy;
        self
    }

    /// Set the wound-phase policy.
    pub fn with_wound(mut self, policy: RerollPolicy) -> Self {
        self.wound = policy;
        self
    }
}

/// The outcome of one combat round, in striking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRoundResult {
    /// Who struck first.
    pub order: InitiativeOrder,
    /// Name of the unit that struck first.
    pub striker: String,
    /// Name of the unit that struck back.
    pub responder: String,
    /// Hits scored by the first striker.
    pub striker_hits: GroupedPhaseResult,
    /// Wounds caused by the first striker.
    pub striker_wounds: GroupedPhaseResult,
    /// Attacks the responder had left after taking wounds.
    pub return_attacks: u32,
    /// Hits scored striking back.
    pub return_hits: GroupedPhaseResult,
    /// Wounds caused striking back.
    pub return_wounds: GroupedPhaseResult,
}

impl CombatRoundResult {
    /// Wounds inflicted by one of the caller's sides.
    pub fn wounds_by(&self, side: Side) -> u32 {
        if side == self.order.first {
            self.striker_wounds.total_successes
        } else {
            self.return_wounds.total_successes
        }
    }
}

/// Strip `casualties` attacks from a unit's groups, rank and file first.
pub fn remove_casualties(groups: &[AttackerGroup], casualties: u32) -> Vec<AttackerGroup> {
    let mut remaining = casualties;
    groups
        .iter()
        .map(|group| {
            let lost = remaining.min(group.attacks);
            remaining -= lost;
            group.with_attacks(group.attacks - lost)
        })
        .collect()
}

/// Validate two profiles and fight one round between them.
pub fn resolve_round(
    attacker: &UnitProfile,
    defender: &UnitProfile,
    policies: &RoundPolicies,
    roller: &mut dyn DieRoller,
) -> EngineResult<CombatRoundResult> {
    let sequencer = CombatSequencer::new(attacker, defender, *policies)?;
    Ok(sequencer.run_to_end(roller))
}
