//! Close-combat resolution engine for rank-and-file tabletop wargames.
//!
//! Provides to-hit and to-wound threshold tables, d6 rolling with reroll
//! policies, attacks by one or two attacker groups, initiative-ordered
//! combat rounds with return attacks, and repeated trials for statistics.
//! Unit profiles come from built-in presets or army-book JSON files.

pub mod attack;
pub mod combat;
pub mod dice;
pub mod error;
pub mod resolution;
pub mod threshold;
pub mod trial;
pub mod unit;
pub mod validate;

pub use attack::{
    AttackMode, AttackReport, AttackRequest, AttackerGroup, DefenderStats, GroupedPhaseResult,
    PhaseKind, resolve_attack, resolve_phase,
};
pub use combat::{
    CombatRoundResult, CombatSequencer, CombatState, InitiativeOrder, RoundPolicies, Side,
    resolve_round,
};
pub use dice::{DieRoller, RngRoller, ScriptedRoller};
pub use error::{EngineError, EngineResult};
pub use resolution::{
    PhaseResult, RerollPolicy, RerollReason, RollOutcome, RollRecord, SuccessCounting,
    resolve_batch, resolve_roll,
};
pub use threshold::{Threshold, expected_successes, hit_threshold, wound_threshold};
pub use trial::{Frequency, TrialConfig, TrialRunner, TrialSummary, Trials};
pub use unit::{Characteristics, ProfileLibrary, ProfileOverlay, ProfileProvider, Stat, UnitProfile};
pub use validate::ValidationIssue;
