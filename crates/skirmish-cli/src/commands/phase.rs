use colored::Colorize;

use skirmish_engine::{AttackMode, AttackRequest, resolve_attack};

use super::{AttackArgs, OutputArgs, RerollArgs};

pub fn run(
    mode: AttackMode,
    attack: &AttackArgs,
    rerolls: &RerollArgs,
    output: &OutputArgs,
) -> Result<(), String> {
    let request = AttackRequest::new(attack.defender(), attack.groups())
        .with_mode(mode)
        .with_hit_rerolls(rerolls.hit_policy())
        .with_wound_rerolls(rerolls.wound_policy());

    let mut roller = output.roller();
    let report = resolve_attack(&request, &mut roller).map_err(|e| e.to_string())?;

    if output.json {
        return super::print_json(&report);
    }

    println!(
        "  {} {}{}",
        "Attack".bold(),
        format!(
            "({mode}: WS {} S {} vs WS {} T {})",
            attack.weapon_skill, attack.strength, attack.defender_weapon_skill, attack.toughness
        )
        .dimmed(),
        output.seed_note()
    );
    println!();

    if let Some(hits) = &report.hits {
        super::print_phase("Hits", hits, &request.hit_rerolls);
    }
    if let Some(wounds) = &report.wounds {
        super::print_phase("Wounds", wounds, &request.wound_rerolls);
    }

    Ok(())
}
