use chrono::{DateTime, Utc};
use gymtris_agent::EpisodeSummary;
use gymtris_engine::{EnvSeed, RewardConfig};
use serde::{Deserialize, Serialize};

use crate::command::PolicyKind;

/// Result of a `rollout` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloutReport {
    /// When the run finished (ISO 8601)
    pub generated_at: DateTime<Utc>,
    /// Seed of the engine's piece generator; episodes share its stream
    pub seed: EnvSeed,
    pub policy: PolicyKind,
    pub max_steps: usize,
    pub reward: RewardConfig,
    pub episodes: Vec<EpisodeRecord>,
    pub mean_steps: f64,
    pub mean_score: f64,
    pub mean_cleared_lines: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    #[serde(flatten)]
    pub summary: EpisodeSummary,
}

impl RolloutReport {
    #[expect(clippy::cast_precision_loss)]
    pub fn new(
        seed: EnvSeed,
        policy: PolicyKind,
        max_steps: usize,
        reward: RewardConfig,
        episodes: Vec<EpisodeRecord>,
    ) -> Self {
        let count = episodes.len().max(1) as f64;
        let mean = |f: fn(&EpisodeSummary) -> f64| {
            episodes.iter().map(|e| f(&e.summary)).sum::<f64>() / count
        };
        let mean_steps = mean(|s| s.steps as f64);
        let mean_score = mean(|s| s.score as f64);
        let mean_cleared_lines = mean(|s| s.cleared_lines as f64);
        Self {
            generated_at: Utc::now(),
            seed,
            policy,
            max_steps,
            reward,
            episodes,
            mean_steps,
            mean_score,
            mean_cleared_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use gymtris_engine::TerminationReason;

    use super::*;

    fn record(episode: usize, steps: usize, score: i64, cleared_lines: usize) -> EpisodeRecord {
        EpisodeRecord {
            episode,
            summary: EpisodeSummary {
                steps,
                score,
                cleared_lines,
                total_reward: 0.0,
                termination: Some(TerminationReason::TopOut),
            },
        }
    }

    #[test]
    fn test_report_means() {
        let report = RolloutReport::new(
            EnvSeed::from(1),
            PolicyKind::Heuristic,
            100,
            RewardConfig::default(),
            vec![record(0, 10, -30, 0), record(1, 30, 90, 4)],
        );
        assert_eq!(report.mean_steps, 20.0);
        assert_eq!(report.mean_score, 30.0);
        assert_eq!(report.mean_cleared_lines, 2.0);
    }

    #[test]
    fn test_report_json_shape() {
        let report = RolloutReport::new(
            EnvSeed::from(1),
            PolicyKind::Random,
            5,
            RewardConfig::default(),
            vec![record(0, 3, -9, 0)],
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["seed"], "00000000000000000000000000000001");
        assert_eq!(value["policy"], "random");
        assert_eq!(value["episodes"][0]["steps"], 3);
        assert_eq!(value["episodes"][0]["termination"], "TopOut");
    }
}
