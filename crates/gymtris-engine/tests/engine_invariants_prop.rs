//! Property tests for the step transition.
//!
//! Invariants covered:
//! - Every cell value stays in 0-7.
//! - No row is full after a committed step.
//! - Occupied cells grow by the placed piece's cell count minus 10 per cleared line.
//! - An unplaceable piece leaves the grid untouched.
//! - The row-scan max height agrees with the column-height scan.
//! - Observations keep their fixed length and mirror the grid.
//! - Counters track the step results.

use gymtris_engine::{
    ACTION_COUNT, BOARD_WIDTH, BoardMetrics, EnvSeed, OBSERVATION_LEN, PlacementAnalysis,
    TetrisEnv,
};
use proptest::prelude::*;

fn assert_grid_consistent(env: &TetrisEnv) {
    let grid = env.grid();
    assert!(grid.color_ids().all(|id| id <= 7));
    let metrics = BoardMetrics::from_grid(grid);
    assert_eq!(metrics.max_height(), grid.max_height());
    assert_eq!(
        metrics.aggregate_height(),
        metrics.column_heights().iter().sum::<usize>()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn step_invariants_hold_over_rollouts(
        seed in any::<u128>(),
        actions in proptest::collection::vec(0..ACTION_COUNT, 1..120),
    ) {
        let mut env = TetrisEnv::with_seed(EnvSeed::from(seed));
        let obs = env.reset();
        prop_assert_eq!(obs.len(), OBSERVATION_LEN);
        prop_assert!(obs.iter().all(|v| *v == 0.0));

        let mut expected_score = 0i64;
        let mut expected_lines = 0usize;

        for action in actions {
            let before = env.grid().clone();
            let kind = env.active_piece();
            let outcome = env.step(action).unwrap();
            assert_grid_consistent(&env);

            prop_assert_eq!(outcome.observation.len(), OBSERVATION_LEN);
            for (value, id) in outcome.observation.grid_features().iter().zip(env.grid().color_ids()) {
                prop_assert_eq!(*value, f32::from(id) / 7.0);
            }

            match outcome.info.placement {
                None => {
                    prop_assert!(outcome.terminated);
                    prop_assert_eq!(outcome.reward, -500.0);
                    prop_assert_eq!(env.grid(), &before);
                }
                Some(placement) => {
                    prop_assert_eq!(placement.kind(), kind);
                    let cleared = outcome.info.cleared_lines;
                    prop_assert_eq!(env.grid().full_rows(), 0);
                    prop_assert_eq!(
                        env.grid().occupied_cells() + cleared * BOARD_WIDTH,
                        before.occupied_cells() + placement.shape().cell_count()
                    );
                    expected_score += outcome.reward.trunc() as i64;
                    expected_lines += cleared;
                }
            }

            prop_assert_eq!(env.score(), expected_score);
            prop_assert_eq!(env.total_cleared_lines(), expected_lines);
            prop_assert_eq!(env.is_terminated(), outcome.terminated);
            if outcome.terminated {
                break;
            }
        }
    }

    #[test]
    fn simulate_matches_step(
        seed in any::<u128>(),
        warmup in proptest::collection::vec(0..ACTION_COUNT, 0..30),
        action in 0..ACTION_COUNT,
    ) {
        let mut env = TetrisEnv::with_seed(EnvSeed::from(seed));
        env.reset();
        for a in warmup {
            if env.step(a).unwrap().terminated {
                return Ok(());
            }
        }

        let kind = env.active_piece();
        let decoded = gymtris_engine::Action::from_index(action).unwrap();
        let analysis = PlacementAnalysis::simulate(env.grid(), kind, decoded);
        let outcome = env.step(action).unwrap();
        match analysis {
            None => prop_assert!(outcome.info.placement.is_none()),
            Some(analysis) => {
                prop_assert_eq!(analysis.grid(), env.grid());
                prop_assert_eq!(analysis.cleared_lines(), outcome.info.cleared_lines);
            }
        }
    }
}
