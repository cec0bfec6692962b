use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use gymtris_agent::run_episode;
use gymtris_engine::{EnvSeed, TetrisEnv};

use crate::{command::PolicyKind, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RenderArg {
    /// Piece generator seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<EnvSeed>,
    /// Policy choosing the actions (random or heuristic)
    #[arg(long, default_value = "heuristic")]
    policy: PolicyKind,
    /// Step limit for the episode
    #[arg(long, default_value_t = 200)]
    max_steps: usize,
    /// JSON file overriding reward parameters
    #[arg(long)]
    reward_config: Option<PathBuf>,
}

pub(crate) fn run(arg: &RenderArg) -> anyhow::Result<()> {
    let RenderArg {
        seed,
        policy,
        max_steps,
        reward_config,
    } = arg;

    let config = util::load_env_config(reward_config.as_deref())?;
    let seed = util::seed_or_random(*seed);
    let mut env = TetrisEnv::with_config(config, seed);
    let mut agent = policy.build(util::policy_seed(seed));

    let mut stdout = io::stdout().lock();
    let mut write_result: io::Result<()> = Ok(());
    let summary = run_episode(&mut env, agent.as_mut(), *max_steps, |env, outcome| {
        if write_result.is_err() {
            return;
        }
        let action = outcome
            .info
            .placement
            .map_or_else(|| "unplaceable".to_string(), |p| p.action().to_string());
        write_result = write!(
            stdout,
            "action {action}, reward {}\n{}\n",
            outcome.reward,
            env.render()
        );
    });
    write_result?;

    eprintln!(
        "Finished after {} steps: score {}, {} lines",
        summary.steps, summary.score, summary.cleared_lines
    );
    Ok(())
}
