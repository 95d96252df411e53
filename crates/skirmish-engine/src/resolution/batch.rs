//! Resolving a batch of dice for one attacker group.

use serde::{Deserialize, Serialize};

use super::{RerollPolicy, RollRecord, resolve_roll};
use crate::dice::DieRoller;
use crate::threshold::Threshold;

/// The dice one attacker group rolled in one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    /// Which attacker group rolled (0 = rank and file, 1 = champion).
    pub group_index: usize,
    /// The threshold every die was rolled against.
    pub threshold: Threshold,
    /// Dice that count as successes after rerolls.
    pub success_count: u32,
    /// Every die in the order it was rolled.
    pub rolls: Vec<RollRecord>,
}

impl PhaseResult {
    /// An empty result: no dice rolled.
    pub fn empty(group_index: usize, threshold: Threshold) -> Self {
        Self {
            group_index,
            threshold,
            success_count: 0,
            rolls: Vec::new(),
        }
    }

    /// Number of dice rolled (not counting rerolls).
    pub fn dice_rolled(&self) -> usize {
        self.rolls.len()
    }

    /// Number of dice that were rerolled.
    pub fn rerolls(&self) -> usize {
        self.rolls.iter().filter(|r| r.reroll_applied()).count()
    }

    /// Deciding faces sorted ascending, for display.
    pub fn sorted_faces(&self) -> Vec<u8> {
        let mut faces: Vec<u8> = self.rolls.iter().map(RollRecord::deciding_roll).collect();
        faces.sort_unstable();
        faces
    }
}

/// Roll `count` dice against `threshold` for attacker group `group_index`.
///
/// A count of zero rolls nothing and yields an empty result.
pub fn resolve_batch(
    group_index: usize,
    threshold: Threshold,
    policy: &RerollPolicy,
    roller: &mut dyn DieRoller,
    count: u32,
) -> PhaseResult {
    let rolls: Vec<RollRecord> = (0..count)
        .map(|_| resolve_roll(threshold, policy, roller))
        .collect();
    let success_count = rolls.iter().filter(|r| r.success).count() as u32;

    tracing::debug!(
        group = group_index,
        %threshold,
        dice = count,
        successes = success_count,
        "resolved batch"
    );

    PhaseResult {
        group_index,
        threshold,
        success_count,
        rolls,
    }
}
