//! Built-in unit profiles.
//!
//! These produce the same [`UnitProfile`] that the equivalent JSON profile
//! would, without needing a file on disk.

use super::{Characteristics, ProfileOverlay, Stat, UnitProfile};

/// Great weapons add two to the wielder's strength.
pub const GREAT_WEAPON_BONUS: u32 = 2;

/// Elven spearmen: disciplined line infantry.
pub fn spearmen() -> UnitProfile {
    UnitProfile::new(
        "Spearmen",
        Characteristics {
            weapon_skill: 4,
            strength: 3,
            toughness: 3,
            initiative: 5,
            attacks: 1,
        },
    )
    .with_champion(ProfileOverlay::new().with(Stat::Attacks, 1))
}

/// Swordmasters: elite infantry with great weapons.
pub fn swordmasters() -> UnitProfile {
    UnitProfile::new(
        "Swordmasters",
        Characteristics {
            weapon_skill: 6,
            strength: 3,
            toughness: 3,
            initiative: 5,
            attacks: 1,
        },
    )
    .with_weapon_bonus(GREAT_WEAPON_BONUS)
    .with_champion(ProfileOverlay::new().with(Stat::Attacks, 1))
}

/// White Lions: axe-wielding guard infantry.
pub fn white_lions() -> UnitProfile {
    UnitProfile::new(
        "White Lions",
        Characteristics {
            weapon_skill: 5,
            strength: 4,
            toughness: 3,
            initiative: 5,
            attacks: 1,
        },
    )
    .with_weapon_bonus(GREAT_WEAPON_BONUS)
    .with_champion(ProfileOverlay::new().with(Stat::Attacks, 1))
}

/// Orc boyz: tough, slow infantry.
pub fn orc_boyz() -> UnitProfile {
    UnitProfile::new(
        "Orc Boyz",
        Characteristics {
            weapon_skill: 3,
            strength: 3,
            toughness: 4,
            initiative: 2,
            attacks: 1,
        },
    )
    .with_champion(ProfileOverlay::new().with(Stat::Attacks, 1))
}

/// Every built-in profile.
pub fn all() -> Vec<UnitProfile> {
    vec![spearmen(), swordmasters(), white_lions(), orc_boyz()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_profile;

    #[test]
    fn presets_are_valid() {
        for profile in all() {
            let issues = validate_profile(&profile);
            assert!(issues.is_empty(), "{}: {issues:?}", profile.name);
        }
    }

    #[test]
    fn great_weapons_raise_strength() {
        assert_eq!(swordmasters().attacking_strength(), 5);
        assert_eq!(white_lions().attacking_strength(), 6);
        assert_eq!(spearmen().attacking_strength(), 3);
    }

    #[test]
    fn champions_attack_twice() {
        for profile in all() {
            assert_eq!(profile.champion_characteristics().attacks, 2, "{}", profile.name);
            assert_eq!(profile.total_attacks(), 6, "{}", profile.name);
        }
    }
}
