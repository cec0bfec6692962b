use clap::{Parser, Subcommand};
use gymtris_agent::{HeuristicPolicy, Policy, RandomPolicy};
use serde::{Deserialize, Serialize};

use self::{predict::PredictArg, render::RenderArg, rollout::RolloutArg};

mod predict;
mod render;
mod rollout;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play episodes with a policy and write a JSON report
    Rollout(#[clap(flatten)] RolloutArg),
    /// Play one episode and print the board after every step
    Render(#[clap(flatten)] RenderArg),
    /// Answer a prediction request with the heuristic policy
    Predict(#[clap(flatten)] PredictArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Rollout(arg) => rollout::run(&arg)?,
        Mode::Render(arg) => render::run(&arg)?,
        Mode::Predict(arg) => predict::run(&arg)?,
    }
    Ok(())
}

#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Random,
    #[default]
    Heuristic,
}

impl PolicyKind {
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::with_seed(seed)),
            PolicyKind::Heuristic => Box::new(HeuristicPolicy::new()),
        }
    }
}
