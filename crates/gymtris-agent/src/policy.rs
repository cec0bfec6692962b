use gymtris_engine::{Action, Grid, PieceKind, StepOutcome, TerminationReason, TetrisEnv};
use serde::{Deserialize, Serialize};

/// Chooses an action for the piece about to be placed.
///
/// Policies only see the board and the active piece, the same inputs a
/// prediction service receives.
pub trait Policy {
    fn select_action(&mut self, grid: &Grid, piece: PieceKind) -> Action;
}

/// Totals of one played episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub score: i64,
    pub cleared_lines: usize,
    pub total_reward: f64,
    /// `None` when the step limit was reached first.
    pub termination: Option<TerminationReason>,
}

/// Resets `env` and plays it with `policy` for at most `max_steps` steps.
///
/// `on_step` is called after every step with the updated engine.
pub fn run_episode<P, F>(
    env: &mut TetrisEnv,
    policy: &mut P,
    max_steps: usize,
    mut on_step: F,
) -> EpisodeSummary
where
    P: Policy + ?Sized,
    F: FnMut(&TetrisEnv, &StepOutcome),
{
    env.reset();
    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut termination = None;

    while steps < max_steps {
        let action = policy.select_action(env.grid(), env.active_piece());
        let outcome = env.step_action(action);
        steps += 1;
        total_reward += f64::from(outcome.reward);
        on_step(env, &outcome);
        if outcome.terminated {
            termination = outcome.info.termination;
            break;
        }
    }

    EpisodeSummary {
        steps,
        score: env.score(),
        cleared_lines: env.total_cleared_lines(),
        total_reward,
        termination,
    }
}
