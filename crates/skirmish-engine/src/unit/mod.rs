//! Unit profiles: the stat lines that feed combat.
//!
//! A profile is a base stat line plus how many models fight (frontage), a
//! weapon strength bonus, and an optional champion whose stat line is the base
//! with an [`ProfileOverlay`] of deltas applied.

pub mod overlay;
pub mod preset;
pub mod provider;

pub use overlay::{ProfileOverlay, Stat};
pub use provider::{ProfileLibrary, ProfileProvider};

use serde::{Deserialize, Serialize};

use crate::attack::{AttackerGroup, DefenderStats};

/// Models fighting in the front rank when a profile does not say otherwise.
pub const DEFAULT_FRONTAGE: u32 = 5;

/// Index of the rank-and-file attacker group.
pub const RANK_AND_FILE: usize = 0;

/// Index of the champion attacker group.
pub const CHAMPION: usize = 1;

/// The combat-relevant part of a stat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    /// Weapon skill.
    pub weapon_skill: u32,
    /// Strength before weapon bonuses.
    pub strength: u32,
    /// Toughness.
    pub toughness: u32,
    /// Initiative; higher strikes first.
    pub initiative: u32,
    /// Attacks per model.
    pub attacks: u32,
}

impl Characteristics {
    /// Read one stat.
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::WeaponSkill => self.weapon_skill,
            Stat::Strength => self.strength,
            Stat::Toughness => self.toughness,
            Stat::Initiative => self.initiative,
            Stat::Attacks => self.attacks,
        }
    }

    /// A copy with one stat replaced.
    pub fn with(mut self, stat: Stat, value: u32) -> Self {
        match stat {
            Stat::WeaponSkill => self.weapon_skill = value,
            Stat::Strength => self.strength = value,
            Stat::Toughness => self.toughness = value,
            Stat::Initiative => self.initiative = value,
            Stat::Attacks => self.attacks = value,
        }
        self
    }
}

/// A unit as it fights in one combat round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProfile {
    /// Display name.
    pub name: String,
    /// The rank-and-file stat line.
    pub characteristics: Characteristics,
    /// Strength added by the unit's weapons.
    #[serde(default)]
    pub weapon_bonus: u32,
    /// Models fighting in the front rank, champion included.
    pub frontage: u32,
    /// Champion stat deltas, if the unit has a champion.
    #[serde(default)]
    pub champion: Option<ProfileOverlay>,
}

impl UnitProfile {
    /// A profile with default frontage, no weapon bonus and no champion.
    pub fn new(name: impl Into<String>, characteristics: Characteristics) -> Self {
        Self {
            name: name.into(),
            characteristics,
            weapon_bonus: 0,
            frontage: DEFAULT_FRONTAGE,
            champion: None,
        }
    }

    /// Set the number of fighting models.
    pub fn with_frontage(mut self, frontage: u32) -> Self {
        self.frontage = frontage;
        self
    }

    /// Set the weapon strength bonus.
    pub fn with_weapon_bonus(mut self, bonus: u32) -> Self {
        self.weapon_bonus = bonus;
        self
    }

    /// Give the unit a champion with the given stat deltas.
    pub fn with_champion(mut self, overlay: ProfileOverlay) -> Self {
        self.champion = Some(overlay);
        self
    }

    /// Strength the rank and file wound with.
    pub fn attacking_strength(&self) -> u32 {
        self.characteristics.strength.saturating_add(self.weapon_bonus)
    }

    /// Initiative of the unit (the rank and file's).
    pub fn initiative(&self) -> u32 {
        self.characteristics.initiative
    }

    /// The champion's stat line, or the base line if there is no champion.
    pub fn champion_characteristics(&self) -> Characteristics {
        match &self.champion {
            Some(overlay) => overlay.apply(&self.characteristics),
            None => self.characteristics,
        }
    }

    /// The unit's attacker groups: rank and file, then the champion if any.
    ///
    /// The champion takes one of the front-rank places.
    pub fn attacker_groups(&self) -> Vec<AttackerGroup> {
        let base = &self.characteristics;
        let champion_models = u32::from(self.champion.is_some()).min(self.frontage);
        let rank_and_file_models = self.frontage - champion_models;

        let mut groups = vec![AttackerGroup::new(
            RANK_AND_FILE,
            base.weapon_skill,
            self.attacking_strength(),
            rank_and_file_models.saturating_mul(base.attacks),
        )];

        if champion_models > 0 {
            let champion = self.champion_characteristics();
            groups.push(AttackerGroup::new(
                CHAMPION,
                champion.weapon_skill,
                champion.strength.saturating_add(self.weapon_bonus),
                champion.attacks,
            ));
        }

        groups
    }

    /// Attacks the whole front rank makes.
    pub fn total_attacks(&self) -> u32 {
        self.attacker_groups().iter().map(|g| g.attacks).sum()
    }

    /// The stats this unit defends with.
    pub fn defender_stats(&self) -> DefenderStats {
        DefenderStats::new(
            self.characteristics.weapon_skill,
            self.characteristics.toughness,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ws: u32, s: u32, t: u32, i: u32, a: u32) -> Characteristics {
        Characteristics {
            weapon_skill: ws,
            strength: s,
            toughness: t,
            initiative: i,
            attacks: a,
        }
    }

    #[test]
    fn get_and_with() {
        let stats = line(4, 3, 3, 5, 1);
        assert_eq!(stats.get(Stat::Initiative), 5);
        assert_eq!(stats.with(Stat::Attacks, 2).attacks, 2);
    }

    #[test]
    fn attacks_without_champion() {
        let unit = UnitProfile::new("Spearmen", line(4, 3, 3, 5, 1)).with_frontage(6);
        let groups = unit.attacker_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].attacks, 6);
        assert_eq!(unit.total_attacks(), 6);
    }

    #[test]
    fn champion_takes_a_front_rank_place() {
        let unit = UnitProfile::new("Swordmasters", line(6, 3, 3, 5, 1))
            .with_frontage(5)
            .with_weapon_bonus(2)
            .with_champion(ProfileOverlay::new().with(Stat::Attacks, 1));
        let groups = unit.attacker_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], AttackerGroup::new(RANK_AND_FILE, 6, 5, 4));
        assert_eq!(groups[1], AttackerGroup::new(CHAMPION, 6, 5, 2));
        assert_eq!(unit.total_attacks(), 6);
        assert_eq!(unit.attacking_strength(), 5);
    }

    #[test]
    fn lone_champion() {
        let unit = UnitProfile::new("Hero", line(5, 4, 4, 5, 2))
            .with_frontage(1)
            .with_champion(ProfileOverlay::new().with(Stat::WeaponSkill, 1));
        let groups = unit.attacker_groups();
        assert_eq!(groups[0].attacks, 0);
        assert_eq!(groups[1].weapon_skill, 6);
        assert_eq!(unit.total_attacks(), 2);
    }

    #[test]
    fn defender_stats_use_base_line() {
        let unit = UnitProfile::new("Boyz", line(3, 3, 4, 2, 1));
        assert_eq!(unit.defender_stats(), DefenderStats::new(3, 4));
        assert_eq!(unit.initiative(), 2);
    }
}
