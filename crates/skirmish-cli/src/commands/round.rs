use std::path::Path;

use colored::Colorize;

use skirmish_engine::{ProfileProvider, Side, resolve_round};

use super::{OutputArgs, RerollArgs};

pub fn run(
    attacker: &str,
    defender: &str,
    profiles: Option<&Path>,
    rerolls: &RerollArgs,
    output: &OutputArgs,
) -> Result<(), String> {
    let library = super::load_library(profiles)?;
    let attacker = library.profile(attacker).map_err(|e| e.to_string())?;
    let defender = library.profile(defender).map_err(|e| e.to_string())?;
    let policies = rerolls.round_policies();

    let mut roller = output.roller();
    let result =
        resolve_round(&attacker, &defender, &policies, &mut roller).map_err(|e| e.to_string())?;

    if output.json {
        return super::print_json(&result);
    }

    println!(
        "  {} {} vs {}{}",
        "Combat round".bold(),
        attacker.name.cyan(),
        defender.name.cyan(),
        output.seed_note()
    );
    let order = if result.order.tied {
        format!("{} strike first (initiative tied, attacker first)", result.striker)
    } else {
        format!("{} strike first (higher initiative)", result.striker)
    };
    println!("  {}", order.dimmed());
    println!();

    super::print_phase(
        &format!("{} hits", result.striker),
        &result.striker_hits,
        &policies.hit,
    );
    super::print_phase(
        &format!("{} wounds", result.striker),
        &result.striker_wounds,
        &policies.wound,
    );

    println!(
        "  {} strike back with {} attacks",
        result.responder, result.return_attacks
    );
    println!();

    super::print_phase(
        &format!("{} hits", result.responder),
        &result.return_hits,
        &policies.hit,
    );
    super::print_phase(
        &format!("{} wounds", result.responder),
        &result.return_wounds,
        &policies.wound,
    );

    let dealt = result.wounds_by(Side::Attacker);
    let taken = result.wounds_by(Side::Defender);
    let verdict = match dealt.cmp(&taken) {
        std::cmp::Ordering::Greater => format!("{} win the round", attacker.name).green().bold(),
        std::cmp::Ordering::Less => format!("{} win the round", defender.name).red().bold(),
        std::cmp::Ordering::Equal => "The round is drawn".yellow().bold(),
    };
    println!(
        "  {}: {} wounds caused, {} suffered",
        verdict, dealt, taken
    );

    Ok(())
}
