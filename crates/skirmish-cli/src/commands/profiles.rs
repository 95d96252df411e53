use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use skirmish_engine::ProfileProvider;
use skirmish_engine::unit::Stat;

pub fn run(profiles: Option<&Path>) -> Result<(), String> {
    let library = super::load_library(profiles)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Unit", "WS", "S", "T", "I", "A", "Frontage", "Attacks", "Champion",
    ]);

    for name in library.names() {
        let profile = library.profile(name).map_err(|e| e.to_string())?;
        let stats = &profile.characteristics;
        let strength = if profile.weapon_bonus > 0 {
            format!("{} ({})", stats.strength, profile.attacking_strength())
        } else {
            stats.strength.to_string()
        };
        let champion = match &profile.champion {
            Some(overlay) if !overlay.is_empty() => Stat::ALL
                .iter()
                .filter(|&&stat| overlay.delta(stat) != 0)
                .map(|&stat| format!("{stat}{:+}", overlay.delta(stat)))
                .collect::<Vec<_>>()
                .join(" "),
            Some(_) => "yes".to_string(),
            None => "-".to_string(),
        };

        table.add_row(vec![
            profile.name.clone(),
            stats.weapon_skill.to_string(),
            strength,
            stats.toughness.to_string(),
            stats.initiative.to_string(),
            stats.attacks.to_string(),
            profile.frontage.to_string(),
            profile.total_attacks().to_string(),
            champion,
        ]);
    }

    println!("  {} {}", "Unit profiles".bold(), format!("({})", library.len()).dimmed());
    println!();
    println!("{table}");
    Ok(())
}
