use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use skirmish_engine::{
    AttackMode, AttackRequest, CombatSequencer, ProfileProvider, Side, TrialConfig, TrialRunner,
    Trials, resolve_attack,
};

use super::{AttackArgs, OutputArgs, RerollArgs, SimulateMode};

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

pub struct SimulateOptions {
    pub mode: SimulateMode,
    pub trials: u32,
    pub parallel: bool,
    pub attacker: Option<String>,
    pub defender: Option<String>,
    pub profiles: Option<PathBuf>,
    pub attack: AttackArgs,
    pub rerolls: RerollArgs,
    pub output: OutputArgs,
}

pub fn run(options: &SimulateOptions) -> Result<(), String> {
    let mut config = TrialConfig::default()
        .with_trials(options.trials)
        .parallel(options.parallel);
    if let Some(seed) = options.output.seed {
        config = config.with_seed(seed);
    }
    let runner = TrialRunner::new(config).map_err(|e| e.to_string())?;

    let (subject, trials) = match options.mode {
        SimulateMode::Round => simulate_round(options, &runner)?,
        SimulateMode::Hit => simulate_attack(options, &runner, AttackMode::Hit)?,
        SimulateMode::Wound => simulate_attack(options, &runner, AttackMode::Wound)?,
        SimulateMode::Attack => simulate_attack(options, &runner, AttackMode::Combat)?,
    };

    if options.output.json {
        return super::print_json(&serde_json::json!({
            "subject": subject,
            "seed": trials.seed,
            "summary": trials.summary(),
            "frequencies": trials.frequencies(),
            "outcomes": trials.outcomes,
        }));
    }

    print_trials(&subject, &trials);
    Ok(())
}

fn simulate_attack(
    options: &SimulateOptions,
    runner: &TrialRunner,
    mode: AttackMode,
) -> Result<(String, Trials), String> {
    let request = AttackRequest::new(options.attack.defender(), options.attack.groups())
        .with_mode(mode)
        .with_hit_rerolls(options.rerolls.hit_policy())
        .with_wound_rerolls(options.rerolls.wound_policy());
    request.validate().map_err(|e| e.to_string())?;

    let trials = runner.run(|roller| {
        resolve_attack(&request, roller).map_or(0, |report| report.headline())
    });
    let counted = if mode == AttackMode::Hit { "hits" } else { "wounds" };
    Ok((format!("{counted} per {mode} roll"), trials))
}

fn simulate_round(
    options: &SimulateOptions,
    runner: &TrialRunner,
) -> Result<(String, Trials), String> {
    let (Some(attacker), Some(defender)) = (&options.attacker, &options.defender) else {
        return Err("round mode needs --attacker and --defender".into());
    };
    let library = super::load_library(options.profiles.as_deref())?;
    let attacker = library.profile(attacker).map_err(|e| e.to_string())?;
    let defender = library.profile(defender).map_err(|e| e.to_string())?;

    let sequencer = CombatSequencer::new(&attacker, &defender, options.rerolls.round_policies())
        .map_err(|e| e.to_string())?;
    let trials = runner.run(|roller| {
        sequencer
            .clone()
            .run_to_end(roller)
            .wounds_by(Side::Attacker)
    });
    Ok((
        format!("wounds by {} against {}", attacker.name, defender.name),
        trials,
    ))
}

fn print_trials(subject: &str, trials: &Trials) {
    let summary = trials.summary();
    let seed = trials
        .seed
        .map(|s| format!(" {}", format!("(seed={s})").dimmed()))
        .unwrap_or_default();
    println!(
        "  {} {}{}",
        "Simulation".bold(),
        format!("({} trials, {subject})", summary.trials).dimmed(),
        seed
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Mean", "Std dev", "Min", "Median", "Max"]);
    table.add_row(vec![
        format!("{:.2}", summary.mean),
        format!("{:.2}", summary.std_dev),
        summary.min.to_string(),
        summary.median.to_string(),
        summary.max.to_string(),
    ]);
    println!("{table}");
    println!();

    println!("  {}", "Distribution".bold().underline());
    println!();
    let frequencies = trials.frequencies();
    let most = frequencies.iter().map(|f| f.count).max().unwrap_or(1);
    for frequency in &frequencies {
        let width = (frequency.count * BAR_WIDTH).div_ceil(most);
        let bar = "#".repeat(width);
        let bar = if frequency.outcome == summary.median {
            bar.green().bold()
        } else {
            bar.cyan()
        };
        println!(
            "  {:>3} | {} {}",
            frequency.outcome,
            bar,
            format!("{} ({:.1}%)", frequency.count, frequency.percentage).dimmed()
        );
    }
    println!();
}
