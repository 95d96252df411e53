//! Per-stat deltas layered over a base profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Characteristics;

/// A stat that an overlay can adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Weapon skill.
    WeaponSkill,
    /// Strength.
    Strength,
    /// Toughness.
    Toughness,
    /// Initiative.
    Initiative,
    /// Attacks.
    Attacks,
}

impl Stat {
    /// Every adjustable stat.
    pub const ALL: [Stat; 5] = [
        Stat::WeaponSkill,
        Stat::Strength,
        Stat::Toughness,
        Stat::Initiative,
        Stat::Attacks,
    ];

    /// Parse a profile key such as `"weapon_skill"` or `"WS"`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "weapon_skill" | "ws" => Some(Self::WeaponSkill),
            "strength" | "s" => Some(Self::Strength),
            "toughness" | "t" => Some(Self::Toughness),
            "initiative" | "i" => Some(Self::Initiative),
            "attacks" | "a" => Some(Self::Attacks),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeaponSkill => write!(f, "WS"),
            Self::Strength => write!(f, "S"),
            Self::Toughness => write!(f, "T"),
            Self::Initiative => write!(f, "I"),
            Self::Attacks => write!(f, "A"),
        }
    }
}

/// Signed adjustments applied to a base stat line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileOverlay {
    deltas: BTreeMap<Stat, i32>,
}

impl ProfileOverlay {
    /// An overlay that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to a stat's adjustment.
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        *self.deltas.entry(stat).or_insert(0) += delta;
        self
    }

    /// The adjustment for one stat.
    pub fn delta(&self, stat: Stat) -> i32 {
        self.deltas.get(&stat).copied().unwrap_or(0)
    }

    /// Returns true if no stat is adjusted.
    pub fn is_empty(&self) -> bool {
        self.deltas.values().all(|&d| d == 0)
    }

    /// The base line with every delta applied; stats never drop below zero.
    pub fn apply(&self, base: &Characteristics) -> Characteristics {
        Stat::ALL.iter().fold(*base, |stats, &stat| {
            let adjusted = i64::from(base.get(stat)) + i64::from(self.delta(stat));
            let value = u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX);
            stats.with(stat, value)
        })
    }
}
