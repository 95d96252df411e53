pub mod phase;
pub mod profiles;
pub mod round;
pub mod simulate;

use std::path::Path;

use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use skirmish_engine::{
    AttackerGroup, DefenderStats, GroupedPhaseResult, ProfileLibrary, RerollPolicy, RngRoller,
    RollRecord, RoundPolicies, SuccessCounting, expected_successes,
};

/// Stats for a hit, wound or combined attack.
#[derive(Args, Debug, Clone)]
pub struct AttackArgs {
    /// Attacker weapon skill
    #[arg(long = "ws", default_value_t = 4)]
    pub weapon_skill: u32,

    /// Attacker strength, weapon bonus included
    #[arg(long, default_value_t = 3)]
    pub strength: u32,

    /// Dice rolled by the rank and file
    #[arg(long, default_value_t = 10)]
    pub attacks: u32,

    /// Champion weapon skill (default: the rank and file's)
    #[arg(long)]
    pub champion_ws: Option<u32>,

    /// Champion strength (default: the rank and file's)
    #[arg(long)]
    pub champion_strength: Option<u32>,

    /// Dice rolled by a champion; 0 means no champion
    #[arg(long, default_value_t = 0)]
    pub champion_attacks: u32,

    /// Defender weapon skill
    #[arg(long = "defender-ws", default_value_t = 4)]
    pub defender_weapon_skill: u32,

    /// Defender toughness
    #[arg(long, default_value_t = 3)]
    pub toughness: u32,
}

impl AttackArgs {
    pub fn groups(&self) -> Vec<AttackerGroup> {
        let mut groups = vec![AttackerGroup::new(
            0,
            self.weapon_skill,
            self.strength,
            self.attacks,
        )];
        if self.champion_attacks > 0 {
            groups.push(AttackerGroup::new(
                1,
                self.champion_ws.unwrap_or(self.weapon_skill),
                self.champion_strength.unwrap_or(self.strength),
                self.champion_attacks,
            ));
        }
        groups
    }

    pub fn defender(&self) -> DefenderStats {
        DefenderStats::new(self.defender_weapon_skill, self.toughness)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RerollFlag {
    /// Reroll failed natural 1s
    Ones,
    /// Reroll every failed die
    Failures,
    /// Reroll every successful die
    Successes,
}

/// Reroll options, per phase.
#[derive(Args, Debug, Clone)]
pub struct RerollArgs {
    /// Rerolls for hit dice (comma separated: ones, failures, successes)
    #[arg(long = "reroll-hits", value_enum, value_delimiter = ',')]
    pub hit: Vec<RerollFlag>,

    /// Rerolls for wound dice (comma separated: ones, failures, successes)
    #[arg(long = "reroll-wounds", value_enum, value_delimiter = ',')]
    pub wound: Vec<RerollFlag>,

    /// A rerolled success keeps its original result
    #[arg(long)]
    pub keep_original: bool,
}

impl RerollArgs {
    fn policy(&self, flags: &[RerollFlag]) -> RerollPolicy {
        let counting = if self.keep_original {
            SuccessCounting::KeepOriginal
        } else {
            SuccessCounting::UseReroll
        };
        RerollPolicy::none()
            .with_reroll_ones(flags.contains(&RerollFlag::Ones))
            .with_reroll_failures(flags.contains(&RerollFlag::Failures))
            .with_reroll_successes(flags.contains(&RerollFlag::Successes))
            .with_success_counting(counting)
    }

    pub fn hit_policy(&self) -> RerollPolicy {
        self.policy(&self.hit)
    }

    pub fn wound_policy(&self) -> RerollPolicy {
        self.policy(&self.wound)
    }

    pub fn round_policies(&self) -> RoundPolicies {
        RoundPolicies::none()
            .with_hit(self.hit_policy())
            .with_wound(self.wound_policy())
    }
}

/// Seeding and output format.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// RNG seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    pub fn roller(&self) -> RngRoller {
        match self.seed {
            Some(seed) => RngRoller::seeded(seed),
            None => RngRoller::from_entropy(),
        }
    }

    /// A dimmed `(seed=N)` note, or nothing when unseeded.
    pub fn seed_note(&self) -> String {
        self.seed
            .map(|s| format!(" {}", format!("(seed={s})").dimmed()))
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SimulateMode {
    /// Count hits
    Hit,
    /// Count wounds from the attack dice
    Wound,
    /// Count wounds from hit dice that were rolled to wound
    Attack,
    /// Count wounds the attacking unit causes in a combat round
    Round,
}

/// Presets plus any JSON profiles in `dir`.
pub fn load_library(dir: Option<&Path>) -> Result<ProfileLibrary, String> {
    let mut library = ProfileLibrary::with_presets();
    if let Some(dir) = dir {
        library
            .load_dir(dir)
            .map_err(|e| format!("cannot load profiles from {}: {e}", dir.display()))?;
    }
    tracing::debug!(profiles = library.len(), "profile library ready");
    Ok(library)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("JSON error: {e}"))?;
    println!("{json}");
    Ok(())
}

pub fn group_label(index: usize) -> &'static str {
    match index {
        0 => "Rank and file",
        1 => "Champion",
        _ => "Group",
    }
}

fn colorize_roll(record: &RollRecord) -> colored::ColoredString {
    let text = record.to_string();
    if record.success {
        text.green().bold()
    } else {
        text.dimmed()
    }
}

/// Print one phase as a table, then every die rolled.
pub fn print_phase(title: &str, result: &GroupedPhaseResult, policy: &RerollPolicy) {
    println!("  {}", title.bold().underline());
    println!();

    if result.groups.is_empty() {
        println!("  {}", "(no dice rolled)".dimmed());
        println!();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Group",
        "Needs",
        "Dice",
        "Rerolls",
        "Expected",
        "Successes",
    ]);
    for group in &result.groups {
        let dice = group.dice_rolled();
        let expected = expected_successes(group.threshold, policy, dice as u32);
        table.add_row(vec![
            group_label(group.group_index).to_string(),
            group.threshold.to_string(),
            dice.to_string(),
            group.rerolls().to_string(),
            format!("{expected:.2}"),
            group.success_count.to_string(),
        ]);
    }
    println!("{table}");

    for group in &result.groups {
        let rolls: Vec<String> = group
            .rolls
            .iter()
            .map(|r| colorize_roll(r).to_string())
            .collect();
        println!(
            "  {} {}",
            format!("{}:", group_label(group.group_index)).dimmed(),
            rolls.join(" ")
        );
    }
    println!(
        "  {} {}",
        format!("Total {}:", result.kind.to_string().to_lowercase()).bold(),
        result.total_successes
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_args() -> AttackArgs {
        AttackArgs {
            weapon_skill: 5,
            strength: 4,
            attacks: 8,
            champion_ws: Some(6),
            champion_strength: None,
            champion_attacks: 2,
            defender_weapon_skill: 3,
            toughness: 4,
        }
    }

    #[test]
    fn champion_group_only_when_it_attacks() {
        let args = attack_args();
        let groups = args.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1], AttackerGroup::new(1, 6, 4, 2));

        let no_champion = AttackArgs {
            champion_attacks: 0,
            ..args
        };
        assert_eq!(no_champion.groups().len(), 1);
    }

    #[test]
    fn reroll_flags_become_policies() {
        let args = RerollArgs {
            hit: vec![RerollFlag::Ones],
            wound: vec![RerollFlag::Failures, RerollFlag::Successes],
            keep_original: true,
        };
        let hit = args.hit_policy();
        assert!(hit.reroll_ones && !hit.reroll_failures);
        let wound = args.wound_policy();
        assert!(wound.reroll_failures && wound.reroll_successes);
        assert_eq!(wound.success_counting, SuccessCounting::KeepOriginal);
        assert_eq!(args.round_policies().wound, wound);
    }
}
