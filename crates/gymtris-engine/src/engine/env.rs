use std::fmt::Write as _;

use arrayvec::ArrayVec;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    StepError,
    core::{BoardMetrics, Grid, PieceKind},
};

use super::{
    action::{ACTION_COUNT, Action},
    config::EnvConfig,
    observation::Observation,
    placement::{Placement, PlacementAnalysis},
    seed::EnvSeed,
    stats::SessionStats,
};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum TerminationReason {
    /// The active piece could not be placed at the requested rotation and column.
    InvalidPlacement,
    /// The stack reached the top-out height after a placement.
    TopOut,
}

/// Diagnostics attached to a step result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub cleared_lines: usize,
    /// The committed placement, absent when the piece could not be placed.
    pub placement: Option<Placement>,
    pub termination: Option<TerminationReason>,
}

/// Result of advancing a session by one placement.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub info: StepInfo,
}

/// A single falling-block session driven through `reset` / `step`.
///
/// Each step places the active piece in one move: the action picks a
/// rotation slot and a column, the piece falls straight down, full lines are
/// cleared, and the reward is computed from the resulting board. The next
/// piece is drawn uniformly from the seven kinds with the instance's own
/// seeded generator, so independent instances never share random state.
///
/// # Example
///
/// ```
/// use gymtris_engine::{EnvSeed, TetrisEnv};
///
/// let mut env = TetrisEnv::with_seed(EnvSeed::from(42));
/// let observation = env.reset();
/// assert_eq!(observation.len(), 203);
///
/// loop {
///     let outcome = env.step(4).unwrap();
///     if outcome.terminated {
///         break;
///     }
/// }
/// assert!(env.is_terminated());
/// assert!(env.step(4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TetrisEnv {
    config: EnvConfig,
    rng: Pcg32,
    grid: Grid,
    active_piece: PieceKind,
    stats: SessionStats,
    terminated: bool,
}

impl Default for TetrisEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TetrisEnv {
    /// Creates an engine seeded from the thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(seed: EnvSeed) -> Self {
        Self::with_config(EnvConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: EnvConfig, seed: EnvSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let active_piece = rng.random();
        Self {
            config,
            rng,
            grid: Grid::EMPTY,
            active_piece,
            stats: SessionStats::new(),
            terminated: false,
        }
    }

    /// Starts a session from an arbitrary board, such as one received in a
    /// [`PredictionRequest`](super::PredictionRequest).
    ///
    /// Counters start at zero. The random stream is only used for pieces after
    /// `active_piece`.
    #[must_use]
    pub fn from_position(
        config: EnvConfig,
        seed: EnvSeed,
        grid: Grid,
        active_piece: PieceKind,
    ) -> Self {
        Self {
            config,
            rng: Pcg32::from_seed(seed.0),
            grid,
            active_piece,
            stats: SessionStats::new(),
            terminated: false,
        }
    }

    /// Starts a fresh session and returns its initial observation.
    ///
    /// The grid is emptied, counters are zeroed, the termination flag is
    /// cleared and a new active piece is drawn. The random stream continues
    /// from where it was.
    pub fn reset(&mut self) -> Observation {
        self.grid = Grid::EMPTY;
        self.stats = SessionStats::new();
        self.terminated = false;
        self.active_piece = self.rng.random();
        self.observation()
    }

    /// Re-seeds the piece generator, then behaves like [`Self::reset`].
    pub fn reset_with_seed(&mut self, seed: EnvSeed) -> Observation {
        self.rng = Pcg32::from_seed(seed.0);
        self.reset()
    }

    /// Advances the session by one placement of the active piece.
    ///
    /// `action` is the raw index `rotation × 10 + column` in `[0, 40)`.
    ///
    /// An unplaceable piece is a normal outcome: the session terminates with
    /// the invalid-placement reward and the grid is left as it was. Out of
    /// range actions and steps after termination are rejected.
    pub fn step(&mut self, action: usize) -> Result<StepOutcome, StepError> {
        if self.terminated {
            return Err(StepError::Terminated);
        }
        let action = Action::from_index(action)?;
        Ok(self.step_action(action))
    }

    /// Like [`Self::step`], but with an already decoded action.
    ///
    /// # Panics
    ///
    /// Panics if the session is terminated.
    pub fn step_action(&mut self, action: Action) -> StepOutcome {
        assert!(!self.terminated, "stepping a terminated session");
        let reward_config = &self.config.reward;

        let Some(analysis) = PlacementAnalysis::simulate(&self.grid, self.active_piece, action)
        else {
            self.terminated = true;
            return StepOutcome {
                observation: self.observation(),
                reward: reward_config.invalid_placement_reward,
                terminated: true,
                info: StepInfo {
                    cleared_lines: 0,
                    placement: None,
                    termination: Some(TerminationReason::InvalidPlacement),
                },
            };
        };

        let cleared_lines = analysis.cleared_lines();
        let placement = *analysis.placement();
        let mut reward = reward_config.placement_reward(cleared_lines, analysis.metrics());
        let termination = if reward_config.is_top_out(analysis.metrics()) {
            reward -= reward_config.top_out_penalty;
            Some(TerminationReason::TopOut)
        } else {
            None
        };
        let observation = Observation::encode(analysis.grid(), analysis.metrics());

        self.grid = analysis.into_grid();
        self.stats.complete_placement(cleared_lines, reward);
        if termination.is_some() {
            self.terminated = true;
        } else {
            self.active_piece = self.rng.random();
        }

        StepOutcome {
            observation,
            reward,
            terminated: self.terminated,
            info: StepInfo {
                cleared_lines,
                placement: Some(placement),
                termination,
            },
        }
    }

    /// Encodes the current board.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::encode(&self.grid, &self.metrics())
    }

    #[must_use]
    pub fn metrics(&self) -> BoardMetrics {
        BoardMetrics::from_grid(&self.grid)
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The piece the next step will place.
    #[must_use]
    pub fn active_piece(&self) -> PieceKind {
        self.active_piece
    }

    /// Overrides the piece the next step will place.
    pub fn set_active_piece(&mut self, kind: PieceKind) {
        self.active_piece = kind;
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.stats.score()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.grid.max_height()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Actions whose placement of the active piece resolves, in index order.
    ///
    /// Rotation slots that alias the same state are all listed.
    #[must_use]
    pub fn valid_actions(&self) -> ArrayVec<Action, ACTION_COUNT> {
        Action::all()
            .filter(|action| Placement::resolve(&self.grid, self.active_piece, *action).is_some())
            .collect()
    }

    /// Renders the grid followed by a `score: S, lines: L` status line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.grid.to_string();
        let _ = writeln!(
            text,
            "score: {}, lines: {}",
            self.stats.score(),
            self.stats.total_cleared_lines()
        );
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_WIDTH, Cell};

    fn env_with(kind: PieceKind) -> TetrisEnv {
        let mut env = TetrisEnv::with_seed(EnvSeed::from(1));
        env.reset();
        env.set_active_piece(kind);
        env
    }

    #[test]
    fn test_reset_state() {
        let mut env = env_with(PieceKind::O);
        env.step(0).unwrap();
        let obs = env.reset();
        assert_eq!(env.grid(), &Grid::EMPTY);
        assert_eq!(env.score(), 0);
        assert_eq!(env.total_cleared_lines(), 0);
        assert!(!env.is_terminated());
        assert_eq!(obs.len(), 203);
        assert!(obs.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_o_piece_on_empty_board() {
        let mut env = env_with(PieceKind::O);
        let outcome = env.step(0).unwrap();
        // aggregate height 4 and bumpiness 2 (column 1 to column 2)
        assert_eq!(outcome.reward, -3.0);
        assert!(!outcome.terminated);
        assert_eq!(outcome.info.placement.unwrap().row(), 18);
        for (y, x) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            assert_eq!(env.grid().cell(y, x), Cell::Filled(PieceKind::O));
        }
        assert_eq!(env.grid().occupied_cells(), 4);
        assert_eq!(env.score(), -3);
    }

    #[test]
    fn test_invalid_placement_terminates_without_mutation() {
        let mut env = env_with(PieceKind::O);
        env.step(0).unwrap();
        let before = env.grid().clone();
        let score = env.score();

        env.set_active_piece(PieceKind::O);
        let outcome = env.step(9).unwrap();
        assert_eq!(outcome.reward, -500.0);
        assert!(outcome.terminated);
        assert_eq!(
            outcome.info.termination,
            Some(TerminationReason::InvalidPlacement)
        );
        assert_eq!(env.grid(), &before);
        assert_eq!(env.score(), score);
        assert!(env.is_terminated());
    }

    #[test]
    fn test_step_after_termination_fails_fast() {
        let mut env = env_with(PieceKind::O);
        env.step(9).unwrap();
        assert!(matches!(env.step(0), Err(StepError::Terminated)));
        env.reset();
        assert!(env.step(0).is_ok());
    }

    #[test]
    fn test_out_of_range_action_rejected() {
        let mut env = env_with(PieceKind::T);
        assert!(matches!(env.step(40), Err(StepError::ActionOutOfRange(_))));
        assert!(!env.is_terminated());
        assert_eq!(env.grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_line_clear_reward() {
        let mut env = env_with(PieceKind::I);
        // Bottom row filled except the last four columns.
        let mut grid = Grid::EMPTY;
        for x in 0..BOARD_WIDTH - 4 {
            grid.set_cell(19, x, Cell::Filled(PieceKind::J));
        }
        env.grid = grid;

        let outcome = env.step(6).unwrap();
        assert_eq!(outcome.info.cleared_lines, 1);
        assert_eq!(outcome.reward, 100.0);
        assert_eq!(env.grid(), &Grid::EMPTY);
        assert_eq!(env.total_cleared_lines(), 1);
        assert_eq!(env.stats().line_cleared_counter()[1], 1);
    }

    #[test]
    fn test_top_out_penalty() {
        let mut below = env_with(PieceKind::I);
        let mut above = env_with(PieceKind::I);
        let mut grid = Grid::EMPTY;
        // Column 0 height 13: a vertical I on top reaches 17 (below threshold).
        for y in 7..20 {
            grid.set_cell(y, 0, Cell::Filled(PieceKind::L));
        }
        below.grid = grid.clone();
        // Column 0 height 14: the same I reaches 18.
        grid.set_cell(6, 0, Cell::Filled(PieceKind::L));
        above.grid = grid;

        let below_outcome = below.step(10).unwrap();
        assert!(!below_outcome.terminated);
        let above_outcome = above.step(10).unwrap();
        assert!(above_outcome.terminated);
        assert_eq!(above_outcome.info.termination, Some(TerminationReason::TopOut));
        assert!(above.is_terminated());
        // One extra unit of height costs 0.5 and adds 1 to bumpiness (0.5).
        assert_eq!(below_outcome.reward - above_outcome.reward, 200.0 + 1.0);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let seed = EnvSeed::from(0xdead_beef);
        let mut a = TetrisEnv::with_seed(seed);
        let mut b = TetrisEnv::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(a.active_piece(), b.active_piece());
            let action = a.valid_actions()[0].index();
            let oa = a.step(action).unwrap();
            let ob = b.step(action).unwrap();
            assert_eq!(oa.reward, ob.reward);
            if oa.terminated {
                break;
            }
        }
    }

    #[test]
    fn test_valid_actions() {
        let env = env_with(PieceKind::O);
        let valid: Vec<_> = env.valid_actions().iter().map(|a| a.index()).collect();
        // O fits columns 0-8 in every aliased rotation slot.
        assert_eq!(valid.len(), 4 * 9);
        assert!(!valid.contains(&9));
        assert!(!valid.contains(&39));
    }

    #[test]
    fn test_render() {
        let mut env = env_with(PieceKind::O);
        env.step(0).unwrap();
        let text = env.render();
        assert!(text.ends_with("score: -3, lines: 0\n"));
        assert!(text.contains("██········"));
    }
}
