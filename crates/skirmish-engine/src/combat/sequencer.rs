//! The steppable combat-round state machine.

use serde::{Deserialize, Serialize};

use super::{CombatRoundResult, InitiativeOrder, RoundPolicies, Side, remove_casualties};
use crate::attack::{AttackerGroup, DefenderStats, GroupedPhaseResult, PhaseKind, resolve_phase};
use crate::dice::DieRoller;
use crate::error::EngineResult;
use crate::unit::UnitProfile;
use crate::validate::{ensure_valid, validate_profile};

/// Where a round has got to. Each state names the step last completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    /// Striking order decided, nothing rolled.
    Start,
    /// The first striker has rolled to hit.
    StrikerHits,
    /// The first striker has rolled to wound.
    StrikerWounds,
    /// The responder's surviving attacks are known.
    ReturnAttacks,
    /// The responder has rolled to hit.
    ReturnHits,
    /// The responder has rolled to wound.
    ReturnWounds,
    /// The round is over.
    Done,
}

impl CombatState {
    /// The state after this one; `Done` stays `Done`.
    pub fn successor(self) -> Self {
        match self {
            Self::Start => Self::StrikerHits,
            Self::StrikerHits => Self::StrikerWounds,
            Self::StrikerWounds => Self::ReturnAttacks,
            Self::ReturnAttacks => Self::ReturnHits,
            Self::ReturnHits => Self::ReturnWounds,
            Self::ReturnWounds | Self::Done => Self::Done,
        }
    }
}

/// Drives one combat round a step at a time.
#[derive(Debug, Clone)]
pub struct CombatSequencer {
    order: InitiativeOrder,
    striker: UnitProfile,
    responder: UnitProfile,
    policies: RoundPolicies,
    state: CombatState,
    striker_hits: GroupedPhaseResult,
    striker_wounds: GroupedPhaseResult,
    return_groups: Vec<AttackerGroup>,
    return_hits: GroupedPhaseResult,
    return_wounds: GroupedPhaseResult,
}

impl CombatSequencer {
    /// Validate both units and decide who strikes first.
    pub fn new(
        attacker: &UnitProfile,
        defender: &UnitProfile,
        policies: RoundPolicies,
    ) -> EngineResult<Self> {
        let mut issues = validate_profile(attacker);
        issues.extend(validate_profile(defender));
        ensure_valid(&issues)?;

        let order = InitiativeOrder::decide(attacker.initiative(), defender.initiative());
        let (striker, responder) = match order.first {
            Side::Attacker => (attacker, defender),
            Side::Defender => (defender, attacker),
        };
        tracing::debug!(
            striker = %striker.name,
            responder = %responder.name,
            tied = order.tied,
            "combat round started"
        );

        Ok(Self {
            order,
            striker: striker.clone(),
            responder: responder.clone(),
            policies,
            state: CombatState::Start,
            striker_hits: GroupedPhaseResult::empty(PhaseKind::Hit),
            striker_wounds: GroupedPhaseResult::empty(PhaseKind::Wound),
            return_groups: Vec::new(),
            return_hits: GroupedPhaseResult::empty(PhaseKind::Hit),
            return_wounds: GroupedPhaseResult::empty(PhaseKind::Wound),
        })
    }

    /// Who strikes first.
    pub fn order(&self) -> InitiativeOrder {
        self.order
    }

    /// The last completed state.
    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Returns true once the round is over.
    pub fn is_done(&self) -> bool {
        self.state == CombatState::Done
    }

    /// Attacks the responder strikes back with; zero until computed.
    pub fn return_attacks(&self) -> u32 {
        self.return_groups.iter().map(|g| g.attacks).sum()
    }

    /// Run the next step and return the state it completed.
    pub fn step(&mut self, roller: &mut dyn DieRoller) -> CombatState {
        let next = self.state.successor();
        match next {
            CombatState::Start | CombatState::Done => {}
            CombatState::StrikerHits => {
                self.striker_hits = resolve_phase(
                    PhaseKind::Hit,
                    &self.striker.attacker_groups(),
                    &self.responder.defender_stats(),
                    &self.policies.hit,
                    roller,
                );
            }
            CombatState::StrikerWounds => {
                self.striker_wounds = wound_phase(
                    &self.striker.attacker_groups(),
                    &self.striker_hits,
                    &self.responder.defender_stats(),
                    &self.policies,
                    roller,
                );
            }
            CombatState::ReturnAttacks => {
                self.return_groups = remove_casualties(
                    &self.responder.attacker_groups(),
                    self.striker_wounds.total_successes,
                );
            }
            CombatState::ReturnHits => {
                self.return_hits = resolve_phase(
                    PhaseKind::Hit,
                    &self.return_groups,
                    &self.striker.defender_stats(),
                    &self.policies.hit,
                    roller,
                );
            }
            CombatState::ReturnWounds => {
                self.return_wounds = wound_phase(
                    &self.return_groups,
                    &self.return_hits,
                    &self.striker.defender_stats(),
                    &self.policies,
                    roller,
                );
            }
        }

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "combat step");
        }
        self.state = next;
        next
    }

    /// Step until the round is over and return its result.
    pub fn run_to_end(mut self, roller: &mut dyn DieRoller) -> CombatRoundResult {
        while !self.is_done() {
            self.step(roller);
        }
        self.into_result()
    }

    /// The result so far; phases not yet rolled are empty.
    pub fn into_result(self) -> CombatRoundResult {
        let return_attacks = self.return_attacks();
        CombatRoundResult {
            order: self.order,
            striker: self.striker.name,
            responder: self.responder.name,
            striker_hits: self.striker_hits,
            striker_wounds: self.striker_wounds,
            return_attacks,
            return_hits: self.return_hits,
            return_wounds: self.return_wounds,
        }
    }
}

/// Each group rolls its own hits to wound.
fn wound_phase(
    groups: &[AttackerGroup],
    hits: &GroupedPhaseResult,
    defender: &DefenderStats,
    policies: &RoundPolicies,
    roller: &mut dyn DieRoller,
) -> GroupedPhaseResult {
    let wounding: Vec<AttackerGroup> = groups
        .iter()
        .map(|g| g.with_attacks(hits.successes_for(g.index)))
        .collect();
    resolve_phase(PhaseKind::Wound, &wounding, defender, &policies.wound, roller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngRoller, ScriptedRoller};
    use crate::resolution::RerollPolicy;
    use crate::unit::preset;

    #[test]
    fn states_advance_in_order() {
        let mut sequencer = CombatSequencer::new(
            &preset::swordmasters(),
            &preset::orc_boyz(),
            RoundPolicies::none(),
        )
        .unwrap();
        let mut roller = RngRoller::seeded(3);
        assert_eq!(sequencer.state(), CombatState::Start);

        let visited: Vec<CombatState> = (0..7).map(|_| sequencer.step(&mut roller)).collect();
        assert_eq!(
            visited,
            vec![
                CombatState::StrikerHits,
                CombatState::StrikerWounds,
                CombatState::ReturnAttacks,
                CombatState::ReturnHits,
                CombatState::ReturnWounds,
                CombatState::Done,
                CombatState::Done,
            ]
        );
        assert!(sequencer.is_done());
    }

    #[test]
    fn champion_rolls_as_its_own_group() {
        // Swordmasters hit orcs on 3+ and wound T4 on 3+.
        let sequencer = CombatSequencer::new(
            &preset::swordmasters(),
            &preset::orc_boyz(),
            RoundPolicies::none(),
        )
        .unwrap();
        let mut roller = ScriptedRoller::new(vec![6]).unwrap();
        let result = sequencer.run_to_end(&mut roller);
        assert_eq!(result.striker_hits.successes_for(0), 4);
        assert_eq!(result.striker_hits.successes_for(1), 2);
        assert_eq!(result.striker_wounds.total_successes, 6);
        assert_eq!(result.return_attacks, 0);
    }

    #[test]
    fn partial_run_reports_what_was_rolled() {
        let mut sequencer = CombatSequencer::new(
            &preset::white_lions(),
            &preset::orc_boyz(),
            RoundPolicies::none(),
        )
        .unwrap();
        let mut roller = ScriptedRoller::new(vec![1]).unwrap();
        sequencer.step(&mut roller);
        sequencer.step(&mut roller);
        sequencer.step(&mut roller);
        assert_eq!(sequencer.return_attacks(), 6);
        let result = sequencer.into_result();
        assert_eq!(result.striker_hits.total_successes, 0);
        assert_eq!(result.return_hits.total_successes, 0);
    }

    #[test]
    fn hit_rerolls_apply_to_both_sides() {
        let policies = RoundPolicies::none().with_hit(RerollPolicy::none().with_reroll_ones(true));
        let sequencer =
            CombatSequencer::new(&preset::spearmen(), &preset::spearmen(), policies).unwrap();
        // Every hit roll is a 1 rerolled into another 1; nothing ever hits.
        let mut roller = ScriptedRoller::new(vec![1]).unwrap();
        let result = sequencer.run_to_end(&mut roller);
        assert_eq!(result.striker_hits.groups[0].rerolls(), 4);
        assert_eq!(result.return_hits.groups[0].rerolls(), 4);
        assert_eq!(roller.consumed(), 24);
    }
}
