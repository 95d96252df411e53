//! Summary statistics over trial outcomes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate statistics for a trial run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Number of trials.
    pub trials: usize,
    /// Mean outcome.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest outcome.
    pub min: u32,
    /// Largest outcome.
    pub max: u32,
    /// Middle outcome (upper middle for an even count).
    pub median: u32,
}

impl TrialSummary {
    /// Summarise a slice of outcomes. An empty slice gives all zeros.
    pub fn from_outcomes(outcomes: &[u32]) -> Self {
        if outcomes.is_empty() {
            return Self {
                trials: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0,
                max: 0,
                median: 0,
            };
        }

        let n = outcomes.len() as f64;
        let mean = outcomes.iter().map(|&o| f64::from(o)).sum::<f64>() / n;
        let variance = outcomes
            .iter()
            .map(|&o| (f64::from(o) - mean).powi(2))
            .sum::<f64>()
            / n;

        let mut sorted = outcomes.to_vec();
        sorted.sort_unstable();

        Self {
            trials: outcomes.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: sorted[sorted.len() / 2],
        }
    }
}

/// How often one outcome occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    /// The outcome (e.g. number of wounds).
    pub outcome: u32,
    /// Trials that produced it.
    pub count: usize,
    /// Share of all trials, 0 to 100.
    pub percentage: f64,
}

/// Count outcomes, ascending by outcome.
pub fn frequencies(outcomes: &[u32]) -> Vec<Frequency> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &outcome in outcomes {
        *counts.entry(outcome).or_insert(0) += 1;
    }
    let total = outcomes.len() as f64;
    counts
        .into_iter()
        .map(|(outcome, count)| Frequency {
            outcome,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_known_outcomes() {
        let summary = TrialSummary::from_outcomes(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(summary.trials, 8);
        assert!((summary.mean - 5.0).abs() < 1e-9);
        assert!((summary.std_dev - 2.0).abs() < 1e-9);
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 9);
        assert_eq!(summary.median, 5);
    }

    #[test]
    fn empty_summary() {
        let summary = TrialSummary::from_outcomes(&[]);
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn frequency_table() {
        let table = frequencies(&[3, 1, 3, 3]);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].outcome, 1);
        assert_eq!(table[0].count, 1);
        assert!((table[0].percentage - 25.0).abs() < 1e-9);
        assert_eq!(table[1].outcome, 3);
        assert_eq!(table[1].count, 3);
        let total: f64 = table.iter().map(|f| f.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(frequencies(&[]).is_empty());
    }
}
