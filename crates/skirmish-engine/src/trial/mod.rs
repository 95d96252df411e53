//! Repeating a dice pipeline over many independent trials.
//!
//! Each trial gets its own [`RngRoller`] seeded from the run's base seed plus
//! the trial index, so a seeded run produces the same outcomes whether it runs
//! sequentially or on the rayon pool.

pub mod stats;

pub use stats::{Frequency, TrialSummary};

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dice::{DieRoller, RngRoller};
use crate::error::EngineResult;
use crate::validate::{ensure_valid, validate_trial_count};

/// Trials run when none are requested.
pub const DEFAULT_TRIALS: u32 = 20;

/// Settings for a trial run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Number of trials.
    pub trials: u32,
    /// Base seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Run trials on the rayon pool.
    pub parallel: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
        }
    }
}

impl TrialConfig {
    /// Set the number of trials.
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Fix the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run on the rayon pool or not.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcomes of a trial run, in trial order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trials {
    /// The base seed the run used, if it was seeded per trial.
    pub seed: Option<u64>,
    /// One outcome per trial.
    pub outcomes: Vec<u32>,
}

impl Trials {
    /// Number of trials run.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if no trials were run.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Mean, spread and range of the outcomes.
    pub fn summary(&self) -> TrialSummary {
        TrialSummary::from_outcomes(&self.outcomes)
    }

    /// How often each outcome occurred, ascending by outcome.
    pub fn frequencies(&self) -> Vec<Frequency> {
        stats::frequencies(&self.outcomes)
    }
}

/// Runs a pipeline once per trial.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    config: TrialConfig,
}

impl TrialRunner {
    /// Validate the config and build a runner.
    pub fn new(config: TrialConfig) -> EngineResult<Self> {
        ensure_valid(&validate_trial_count(config.trials))?;
        Ok(Self { config })
    }

    /// The runner's settings.
    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Run the pipeline once per trial, each with its own seeded roller.
    pub fn run<F>(&self, pipeline: F) -> Trials
    where
        F: Fn(&mut dyn DieRoller) -> u32 + Sync,
    {
        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let start = Instant::now();

        let trial = |i: u32| {
            let mut roller = RngRoller::seeded(seed.wrapping_add(u64::from(i)));
            pipeline(&mut roller)
        };
        let outcomes: Vec<u32> = if self.config.parallel {
            (0..self.config.trials).into_par_iter().map(trial).collect()
        } else {
            (0..self.config.trials).map(trial).collect()
        };

        tracing::info!(
            trials = self.config.trials,
            seed,
            parallel = self.config.parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "trial run finished"
        );
        Trials {
            seed: Some(seed),
            outcomes,
        }
    }

    /// Run every trial on one caller-supplied roller, in order.
    pub fn run_with<F>(&self, roller: &mut dyn DieRoller, pipeline: F) -> Trials
    where
        F: Fn(&mut dyn DieRoller) -> u32,
    {
        let outcomes: Vec<u32> = (0..self.config.trials)
            .map(|_| pipeline(&mut *roller))
            .collect();
        tracing::info!(
            trials = self.config.trials,
            "trial run finished on supplied roller"
        );
        Trials {
            seed: None,
            outcomes,
        }
    }
}
