//! One-shot attack requests: hits only, wounds only, or hits feeding wounds.

use serde::{Deserialize, Serialize};

use super::{AttackerGroup, DefenderStats, GroupedPhaseResult, PhaseKind, resolve_phase};
use crate::dice::DieRoller;
use crate::error::{EngineError, EngineResult};
use crate::resolution::RerollPolicy;
use crate::validate::{ensure_valid, validate_defender, validate_groups};

/// Which phases an attack request rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    /// Roll to hit only.
    Hit,
    /// Roll to wound only, using each group's attacks as wound dice.
    Wound,
    /// Roll to hit, then roll each group's hits to wound.
    #[default]
    Combat,
}

impl AttackMode {
    /// The phases this mode rolls, in order.
    pub fn kinds(self) -> &'static [PhaseKind] {
        match self {
            Self::Hit => &[PhaseKind::Hit],
            Self::Wound => &[PhaseKind::Wound],
            Self::Combat => &[PhaseKind::Hit, PhaseKind::Wound],
        }
    }
}

impl std::fmt::Display for AttackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Wound => write!(f, "wound"),
            Self::Combat => write!(f, "hit and wound"),
        }
    }
}

/// Everything needed to resolve one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// The unit being attacked.
    pub defender: DefenderStats,
    /// One or two attacker groups.
    pub groups: Vec<AttackerGroup>,
    /// Which phases to roll.
    pub mode: AttackMode,
    /// Rerolls for the hit phase.
    #[serde(default)]
    pub hit_rerolls: RerollPolicy,
    /// Rerolls for the wound phase.
    #[serde(default)]
    pub wound_rerolls: RerollPolicy,
}

impl AttackRequest {
    /// A combined hit and wound request with no rerolls.
    pub fn new(defender: DefenderStats, groups: Vec<AttackerGroup>) -> Self {
        Self {
            defender,
            groups,
            mode: AttackMode::default(),
            hit_rerolls: RerollPolicy::none(),
            wound_rerolls: RerollPolicy::none(),
        }
    }

    /// Set which phases to roll.
    pub fn with_mode(mut self, mode: AttackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the hit-phase reroll policy.
    pub fn with_hit_rerolls(mut self, policy: RerollPolicy) -> Self {
        self.hit_rerolls = policy;
        self
    }

    /// Set the wound-phase reroll policy.
    pub fn with_wound_rerolls(mut self, policy: RerollPolicy) -> Self {
        self.wound_rerolls = policy;
        self
    }

    /// The phases this request rolls.
    pub fn kinds(&self) -> &'static [PhaseKind] {
        self.mode.kinds()
    }

    /// Check the request without rolling anything.
    pub fn validate(&self) -> EngineResult<()> {
        if self.groups.is_empty() {
            return Err(EngineError::InvalidInput(
                "attackers: at least one group is required".to_string(),
            ));
        }
        let mut issues = validate_defender(&self.defender);
        issues.extend(validate_groups(&self.groups, &self.defender, self.kinds()));
        for issue in issues.iter().filter(|i| !i.is_error) {
            tracing::debug!(%issue, "attack request warning");
        }
        ensure_valid(&issues)
    }
}

/// The phases an attack request rolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    /// The mode that was resolved.
    pub mode: AttackMode,
    /// Hit phase, if rolled.
    pub hits: Option<GroupedPhaseResult>,
    /// Wound phase, if rolled.
    pub wounds: Option<GroupedPhaseResult>,
}

impl AttackReport {
    /// Total hits, or 0 if no hit phase was rolled.
    pub fn total_hits(&self) -> u32 {
        self.hits.as_ref().map_or(0, |h| h.total_successes)
    }

    /// Total wounds, or 0 if no wound phase was rolled.
    pub fn total_wounds(&self) -> u32 {
        self.wounds.as_ref().map_or(0, |w| w.total_successes)
    }

    /// The outcome a trial would count: wounds if rolled, otherwise hits.
    pub fn headline(&self) -> u32 {
        match (&self.hits, &self.wounds) {
            (_, Some(wounds)) => wounds.total_successes,
            (Some(hits), None) => hits.total_successes,
            (None, None) => 0,
        }
    }
}

/// Validate and resolve an attack request.
///
/// In [`AttackMode::Combat`] each group's hits become that group's wound
/// dice; a group that scored no hits rolls nothing to wound.
pub fn resolve_attack(
    request: &AttackRequest,
    roller: &mut dyn DieRoller,
) -> EngineResult<AttackReport> {
    request.validate()?;
    Ok(resolve_validated(request, roller))
}

/// Resolve a request already known to be valid.
fn resolve_validated(request: &AttackRequest, roller: &mut dyn DieRoller) -> AttackReport {
    let defender = &request.defender;
    let report = match request.mode {
        AttackMode::Hit => AttackReport {
            mode: request.mode,
            hits: Some(resolve_phase(
                PhaseKind::Hit,
                &request.groups,
                defender,
                &request.hit_rerolls,
                roller,
            )),
            wounds: None,
        },
        AttackMode::Wound => AttackReport {
            mode: request.mode,
            hits: None,
            wounds: Some(resolve_phase(
                PhaseKind::Wound,
                &request.groups,
                defender,
                &request.wound_rerolls,
                roller,
            )),
        },
        AttackMode::Combat => {
            let hits = resolve_phase(
                PhaseKind::Hit,
                &request.groups,
                defender,
                &request.hit_rerolls,
                roller,
            );
            let wounding: Vec<AttackerGroup> = request
                .groups
                .iter()
                .map(|g| g.with_attacks(hits.successes_for(g.index)))
                .collect();
            let wounds = resolve_phase(
                PhaseKind::Wound,
                &wounding,
                defender,
                &request.wound_rerolls,
                roller,
            );
            AttackReport {
                mode: request.mode,
                hits: Some(hits),
                wounds: Some(wounds),
            }
        }
    };

    tracing::debug!(
        mode = %report.mode,
        hits = report.total_hits(),
        wounds = report.total_wounds(),
        "attack resolved"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::threshold::Threshold;

    fn scripted(faces: &[u8]) -> ScriptedRoller {
        ScriptedRoller::new(faces.to_vec()).unwrap()
    }

    #[test]
    fn hit_only() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 3),
            vec![AttackerGroup::new(0, 7, 3, 10)],
        )
        .with_mode(AttackMode::Hit);
        let mut roller = scripted(&[2, 3, 4, 5, 6, 2, 3, 4, 5, 6]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        let hits = report.hits.as_ref().unwrap();
        assert_eq!(hits.groups[0].threshold, Threshold::Two);
        assert_eq!(report.total_hits(), 10);
        assert!(report.wounds.is_none());
        assert_eq!(report.headline(), 10);
    }

    #[test]
    fn wound_only_uses_attacks_as_dice() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 4),
            vec![AttackerGroup::new(0, 3, 4, 4)],
        )
        .with_mode(AttackMode::Wound);
        let mut roller = scripted(&[4, 3, 6, 1]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        assert!(report.hits.is_none());
        assert_eq!(report.total_wounds(), 2);
        assert_eq!(roller.consumed(), 4);
    }

    #[test]
    fn combat_feeds_each_groups_hits_into_its_wounds() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 3),
            vec![AttackerGroup::new(0, 3, 3, 3), AttackerGroup::new(1, 7, 5, 2)],
        );
        // Hits: group 0 at 4+ [4, 4, 1] -> 2, group 1 at 2+ [2, 1] -> 1.
        // Wounds: group 0 at 4+ [4, 3] -> 1, group 1 at 2+ [2] -> 1.
        let mut roller = scripted(&[4, 4, 1, 2, 1, 4, 3, 2]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        assert_eq!(report.total_hits(), 3);
        let wounds = report.wounds.as_ref().unwrap();
        assert_eq!(wounds.group(0).unwrap().dice_rolled(), 2);
        assert_eq!(wounds.group(1).unwrap().dice_rolled(), 1);
        assert_eq!(report.total_wounds(), 2);
        assert_eq!(roller.consumed(), 8);
    }

    #[test]
    fn combat_group_without_hits_skips_wounds() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 3),
            vec![AttackerGroup::new(0, 3, 3, 2)],
        );
        let mut roller = scripted(&[1, 1]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        assert_eq!(report.wounds, Some(GroupedPhaseResult::empty(PhaseKind::Wound)));
        assert_eq!(roller.consumed(), 2);
    }

    #[test]
    fn wound_rerolls_apply_only_to_wounds() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 3),
            vec![AttackerGroup::new(0, 3, 3, 1)],
        )
        .with_wound_rerolls(RerollPolicy::none().with_reroll_failures(true));
        // Hit 4 (success, no hit reroll), wound 2 fails then 5 succeeds.
        let mut roller = scripted(&[4, 2, 5]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        assert_eq!(report.total_wounds(), 1);
        assert_eq!(report.wounds.unwrap().groups[0].rerolls(), 1);
    }

    #[test]
    fn rejects_invalid_requests() {
        let mut roller = scripted(&[6]);
        let none = AttackRequest::new(DefenderStats::new(3, 3), Vec::new());
        assert!(matches!(resolve_attack(&none, &mut roller), Err(EngineError::InvalidInput(_))));

        let group = AttackerGroup::new(0, 3, 3, 1);
        let three = AttackRequest::new(DefenderStats::new(3, 3), vec![group; 3]);
        assert!(resolve_attack(&three, &mut roller).is_err());

        let bad_defender = AttackRequest::new(DefenderStats::new(0, 3), vec![group]);
        assert!(resolve_attack(&bad_defender, &mut roller).is_err());
        assert_eq!(roller.consumed(), 0);
    }

    #[test]
    fn shared_group_index_is_rejected() {
        let group = AttackerGroup::new(0, 3, 3, 2);
        let request = AttackRequest::new(DefenderStats::new(3, 3), vec![group, group]);
        let mut roller = scripted(&[6, 6, 1, 1, 6]);
        let result = resolve_attack(&request, &mut roller);
        assert!(matches!(result, Err(EngineError::InvalidInput(ref m)) if m.contains("group 1")));
        assert_eq!(roller.consumed(), 0);
    }

    #[test]
    fn hopeless_wounds_are_not_errors() {
        let request = AttackRequest::new(
            DefenderStats::new(3, 9),
            vec![AttackerGroup::new(0, 3, 3, 2)],
        )
        .with_mode(AttackMode::Wound);
        let mut roller = scripted(&[6]);
        let report = resolve_attack(&request, &mut roller).unwrap();
        assert_eq!(report.total_wounds(), 0);
    }

    #[test]
    fn mode_kinds() {
        assert_eq!(AttackMode::Hit.kinds(), &[PhaseKind::Hit]);
        assert_eq!(AttackMode::Combat.kinds(), &[PhaseKind::Hit, PhaseKind::Wound]);
        assert_eq!(AttackMode::default(), AttackMode::Combat);
    }
}
