//! CLI frontend for the skirmish close-combat resolver.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use commands::{AttackArgs, OutputArgs, RerollArgs, SimulateMode};
use skirmish_engine::AttackMode;

#[derive(Parser)]
#[command(
    name = "skirmish",
    about = "Skirmish: to-hit, to-wound and close-combat rolls for rank-and-file wargames",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll to hit (weapon skill against weapon skill)
    Hit {
        #[command(flatten)]
        attack: AttackArgs,
        #[command(flatten)]
        rerolls: RerollArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Roll to wound (strength against toughness)
    Wound {
        #[command(flatten)]
        attack: AttackArgs,
        #[command(flatten)]
        rerolls: RerollArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Roll to hit, then roll each group's hits to wound
    Attack {
        #[command(flatten)]
        attack: AttackArgs,
        #[command(flatten)]
        rerolls: RerollArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fight one initiative-ordered combat round between two units
    Round {
        /// Attacking unit (preset or profile name)
        attacker: String,

        /// Defending unit (preset or profile name)
        defender: String,

        /// Directory of JSON unit profiles to load alongside the presets
        #[arg(short, long)]
        profiles: Option<PathBuf>,

        #[command(flatten)]
        rerolls: RerollArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Repeat an attack or a combat round and show the outcome distribution
    Simulate {
        /// What to repeat
        #[arg(short, long, value_enum, default_value_t = SimulateMode::Attack)]
        mode: SimulateMode,

        /// Number of trials
        #[arg(short = 'n', long, default_value_t = skirmish_engine::trial::DEFAULT_TRIALS)]
        trials: u32,

        /// Run trials in parallel
        #[arg(long)]
        parallel: bool,

        /// Attacking unit, for round mode
        #[arg(long, required_if_eq("mode", "round"))]
        attacker: Option<String>,

        /// Defending unit, for round mode
        #[arg(long, required_if_eq("mode", "round"))]
        defender: Option<String>,

        /// Directory of JSON unit profiles, for round mode
        #[arg(short, long)]
        profiles: Option<PathBuf>,

        #[command(flatten)]
        attack: AttackArgs,
        #[command(flatten)]
        rerolls: RerollArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the available unit profiles
    Profiles {
        /// Directory of JSON unit profiles to load alongside the presets
        #[arg(short, long)]
        profiles: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hit {
            attack,
            rerolls,
            output,
        } => commands::phase::run(AttackMode::Hit, &attack, &rerolls, &output),
        Commands::Wound {
            attack,
            rerolls,
            output,
        } => commands::phase::run(AttackMode::Wound, &attack, &rerolls, &output),
        Commands::Attack {
            attack,
            rerolls,
            output,
        } => commands::phase::run(AttackMode::Combat, &attack, &rerolls, &output),
        Commands::Round {
            attacker,
            defender,
            profiles,
            rerolls,
            output,
        } => commands::round::run(&attacker, &defender, profiles.as_deref(), &rerolls, &output),
        Commands::Simulate {
            mode,
            trials,
            parallel,
            attacker,
            defender,
            profiles,
            attack,
            rerolls,
            output,
        } => commands::simulate::run(&commands::simulate::SimulateOptions {
            mode,
            trials,
            parallel,
            attacker,
            defender,
            profiles,
            attack,
            rerolls,
            output,
        }),
        Commands::Profiles { profiles } => commands::profiles::run(profiles.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
