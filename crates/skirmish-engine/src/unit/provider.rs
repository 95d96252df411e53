//! Looking up unit profiles by name.
//!
//! The engine only needs a [`UnitProfile`]; where it comes from is up to the
//! [`ProfileProvider`]. [`ProfileLibrary`] serves the built-in presets plus
//! any JSON profile documents loaded into it.
//!
//! JSON documents use the army-book layout:
//!
//! ```json
//! {
//!   "unit": "Swordmasters",
//!   "character_profile": { "weapon_skill": 6, "strength": 3, "toughness": 3,
//!                          "initiative": 5, "attacks": 1, "leadership": 8 },
//!   "unit_category": { "models_per_row": 5, "models_per_unit": 10 },
//!   "weapons": { "strength": 2 },
//!   "profile_extras": { "Champion": { "attacks": 1 } }
//! }
//! ```
//!
//! Keys the engine has no use for (movement, leadership, base size, points)
//! are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{Characteristics, DEFAULT_FRONTAGE, ProfileOverlay, Stat, UnitProfile, preset};
use crate::error::{EngineError, EngineResult};
use crate::validate::{ensure_valid, validate_profile};

/// A source of unit profiles.
pub trait ProfileProvider {
    /// Look up a profile by name.
    fn profile(&self, name: &str) -> EngineResult<UnitProfile>;
}

#[derive(Debug, Deserialize)]
struct ProfileDocument {
    unit: String,
    character_profile: Characteristics,
    #[serde(default)]
    unit_category: Option<UnitCategory>,
    #[serde(default)]
    weapons: Option<WeaponBlock>,
    #[serde(default)]
    profile_extras: BTreeMap<String, BTreeMap<String, i32>>,
}

#[derive(Debug, Deserialize)]
struct UnitCategory {
    models_per_row: u32,
}

#[derive(Debug, Deserialize)]
struct WeaponBlock {
    #[serde(default)]
    strength: u32,
}

impl ProfileDocument {
    fn into_profile(self) -> UnitProfile {
        let frontage = self
            .unit_category
            .map_or(DEFAULT_FRONTAGE, |c| c.models_per_row);
        let weapon_bonus = self.weapons.map_or(0, |w| w.strength);

        let champion = self
            .profile_extras
            .iter()
            .find(|(role, _)| role.eq_ignore_ascii_case("champion"))
            .map(|(_, extras)| {
                extras
                    .iter()
                    .filter_map(|(key, &delta)| Stat::from_key(key).map(|stat| (stat, delta)))
                    .fold(ProfileOverlay::new(), |overlay, (stat, delta)| {
                        overlay.with(stat, delta)
                    })
            });

        let mut profile = UnitProfile::new(self.unit, self.character_profile)
            .with_frontage(frontage)
            .with_weapon_bonus(weapon_bonus);
        profile.champion = champion;
        profile
    }
}

/// Normalise a unit name for lookup: case, spaces, hyphens and underscores
/// are not significant.
fn lookup_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}

/// An in-memory set of unit profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileLibrary {
    profiles: BTreeMap<String, UnitProfile>,
}

impl ProfileLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding the built-in presets.
    pub fn with_presets() -> Self {
        let mut library = Self::new();
        for profile in preset::all() {
            library.insert(profile);
        }
        library
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, profile: UnitProfile) {
        self.profiles.insert(lookup_key(&profile.name), profile);
    }

    /// Parse, validate and add one JSON profile document.
    pub fn load_json_str(&mut self, json: &str) -> EngineResult<UnitProfile> {
        let document: ProfileDocument =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidProfile(e.to_string()))?;
        let profile = document.into_profile();
        ensure_valid(&validate_profile(&profile))?;
        self.insert(profile.clone());
        Ok(profile)
    }

    /// Load one JSON profile file.
    pub fn load_file(&mut self, path: &Path) -> EngineResult<UnitProfile> {
        let json = std::fs::read_to_string(path)?;
        self.load_json_str(&json).map_err(|e| match e {
            EngineError::InvalidProfile(msg) => {
                EngineError::InvalidProfile(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Load every `.json` file in a directory, returning how many were added.
    pub fn load_dir(&mut self, dir: &Path) -> EngineResult<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }
        tracing::debug!(dir = %dir.display(), count = paths.len(), "loaded unit profiles");
        Ok(paths.len())
    }

    /// Names of every profile, in lookup order.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.values().map(|p| p.name.as_str()).collect()
    }

    /// Number of profiles held.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileProvider for ProfileLibrary {
    fn profile(&self, name: &str) -> EngineResult<UnitProfile> {
        self.profiles
            .get(&lookup_key(name))
            .cloned()
            .ok_or_else(|| EngineError::UnknownProfile(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWORDMASTERS: &str = r#"{
        "unit": "Swordmasters",
        "faction": "High Elves",
        "unit_type": "infantry",
        "character_profile": {
            "movement": 5, "weapon_skill": 6, "ballistic_skill": 4, "strength": 3,
            "toughness": 3, "initiative": 5, "attacks": 1, "leadership": 8
        },
        "unit_category": {
            "wounds": 1, "save": "5+", "points_cost": 15,
            "models_per_unit": 10, "models_per_row": 5
        },
        "base_size": { "width": 25, "depth": 25 },
        "command": { "champion": true },
        "weapons": { "strength": 2 },
        "profile_extras": { "Champion": { "attacks": 1, "leadership": 1 } }
    }"#;

    #[test]
    fn presets_by_any_spelling() {
        let library = ProfileLibrary::with_presets();
        assert_eq!(library.len(), 4);
        assert_eq!(library.profile("white_lions").unwrap().name, "White Lions");
        assert_eq!(library.profile("White-Lions").unwrap().name, "White Lions");
        assert_eq!(library.profile("ORC BOYZ").unwrap().name, "Orc Boyz");
    }

    #[test]
    fn unknown_profile() {
        let library = ProfileLibrary::new();
        assert!(library.is_empty());
        let err = library.profile("goblins").unwrap_err();
        assert!(matches!(err, EngineError::UnknownProfile(name) if name == "goblins"));
    }

    #[test]
    fn loads_army_book_document() {
        let mut library = ProfileLibrary::new();
        let profile = library.load_json_str(SWORDMASTERS).unwrap();
        assert_eq!(profile.name, "Swordmasters");
        assert_eq!(profile.frontage, 5);
        assert_eq!(profile.weapon_bonus, 2);
        assert_eq!(profile.attacking_strength(), 5);
        let champion = profile.champion.as_ref().unwrap();
        assert_eq!(champion.delta(Stat::Attacks), 1);
        assert_eq!(profile, library.profile("swordmasters").unwrap());
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let mut library = ProfileLibrary::new();
        let profile = library
            .load_json_str(
                r#"{"unit": "Militia", "character_profile": {
                    "weapon_skill": 3, "strength": 3, "toughness": 3,
                    "initiative": 3, "attacks": 1}}"#,
            )
            .unwrap();
        assert_eq!(profile.frontage, DEFAULT_FRONTAGE);
        assert_eq!(profile.weapon_bonus, 0);
        assert!(profile.champion.is_none());
    }

    #[test]
    fn malformed_and_out_of_range_documents() {
        let mut library = ProfileLibrary::new();
        assert!(matches!(
            library.load_json_str("{ not json"),
            Err(EngineError::InvalidProfile(_))
        ));
        assert!(matches!(
            library.load_json_str(
                r#"{"unit": "Giants", "character_profile": {
                    "weapon_skill": 3, "strength": 11, "toughness": 5,
                    "initiative": 1, "attacks": 5}}"#,
            ),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn loads_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("swordmasters.json"), SWORDMASTERS).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut library = ProfileLibrary::new();
        assert_eq!(library.load_dir(dir.path()).unwrap(), 1);
        assert_eq!(library.names(), vec!["Swordmasters"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let mut library = ProfileLibrary::new();
        let err = library
            .load_dir(Path::new("/definitely/not/a/profile/dir"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
