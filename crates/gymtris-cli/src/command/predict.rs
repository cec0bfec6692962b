use std::path::PathBuf;

use gymtris_agent::{HeuristicPolicy, Policy as _};
use gymtris_engine::{PredictionRequest, PredictionResponse};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Request JSON file (stdin if omitted)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let PredictArg { input, output } = arg;

    let request: PredictionRequest = util::read_json_input("prediction request", input.as_deref())?;
    let action = HeuristicPolicy::new().select_action(&request.board, request.current_piece);
    let response = PredictionResponse::from(action);
    Output::save_json(&response, output.clone())?;
    Ok(())
}
