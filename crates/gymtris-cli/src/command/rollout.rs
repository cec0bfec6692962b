use std::path::PathBuf;

use gymtris_agent::run_episode;
use gymtris_engine::{EnvSeed, TetrisEnv};

use crate::{
    command::PolicyKind,
    schema::report::{EpisodeRecord, RolloutReport},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RolloutArg {
    /// Number of episodes to play
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Piece generator seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<EnvSeed>,
    /// Policy choosing the actions (random or heuristic)
    #[arg(long, default_value = "heuristic")]
    policy: PolicyKind,
    /// Step limit per episode
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,
    /// JSON file overriding reward parameters
    #[arg(long)]
    reward_config: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RolloutArg) -> anyhow::Result<()> {
    let RolloutArg {
        episodes,
        seed,
        policy,
        max_steps,
        reward_config,
        output,
    } = arg;

    let config = util::load_env_config(reward_config.as_deref())?;
    let seed = util::seed_or_random(*seed);
    let reward = config.reward.clone();
    let mut env = TetrisEnv::with_config(config, seed);
    let mut agent = policy.build(util::policy_seed(seed));

    eprintln!("Playing {episodes} episodes with the {policy} policy...");
    let mut records = Vec::with_capacity(*episodes);
    for episode in 0..*episodes {
        let summary = run_episode(&mut env, agent.as_mut(), *max_steps, |_, _| {});
        let ending = summary
            .termination
            .map_or_else(|| "step limit".to_string(), |reason| format!("{reason:?}"));
        eprintln!(
            "Episode {episode}: {} steps, score {}, {} lines ({ending})",
            summary.steps, summary.score, summary.cleared_lines
        );
        records.push(EpisodeRecord { episode, summary });
    }

    let report = RolloutReport::new(seed, *policy, *max_steps, reward, records);
    eprintln!(
        "Mean steps {:.1}, mean score {:.1}, mean lines {:.1}",
        report.mean_steps, report.mean_score, report.mean_cleared_lines
    );
    Output::save_json(&report, output.clone())?;
    Ok(())
}
