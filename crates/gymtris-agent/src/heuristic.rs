//! Greedy one-piece lookahead scored by weighted board features.
//!
//! For every rotation state and column the piece is dropped onto a copy of
//! the board *without* clearing lines, and the resulting board is scored:
//!
//! ```text
//! cost = aggregate_height·wₕ + holes·w_holes + edge_bumpiness·w_b + complete_lines·w_l
//! ```
//!
//! Lower cost is better. `w_l` is negative, so completed lines pull the cost
//! down. The weights depend on how tall the candidate board already is:
//!
//! | phase    | max height | wₕ   | w_holes | w_b  | w_l  |
//! |----------|------------|------|---------|------|------|
//! | early    | < 8        | 0.22 | 1.25    | 0.35 | -2.8 |
//! | mid      | < 14       | 0.28 | 1.25    | 0.55 | -2.2 |
//! | survival | otherwise  | 0.38 | 1.5     | 0.6  | -3.2 |
//!
//! `edge_bumpiness` is the usual bumpiness with the two outermost column
//! pairs (0-1 and 8-9) counted at half weight.

use std::iter;

use gymtris_engine::{Action, BOARD_WIDTH, BoardMetrics, Grid, PieceKind, Placement};
use serde::{Deserialize, Serialize};

use crate::policy::Policy;

/// Danger level of a board, from its tallest column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicPhase {
    Early,
    Mid,
    Survival,
}

impl HeuristicPhase {
    #[must_use]
    pub fn from_max_height(max_height: usize) -> Self {
        match max_height {
            0..8 => Self::Early,
            8..14 => Self::Mid,
            _ => Self::Survival,
        }
    }

    #[must_use]
    pub fn weights(self) -> HeuristicWeights {
        match self {
            Self::Early => HeuristicWeights {
                aggregate_height: 0.22,
                holes: 1.25,
                bumpiness: 0.35,
                complete_lines: -2.8,
            },
            Self::Mid => HeuristicWeights {
                aggregate_height: 0.28,
                holes: 1.25,
                bumpiness: 0.55,
                complete_lines: -2.2,
            },
            Self::Survival => HeuristicWeights {
                aggregate_height: 0.38,
                holes: 1.5,
                bumpiness: 0.6,
                complete_lines: -3.2,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub aggregate_height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub complete_lines: f32,
}

/// A scored candidate placement.
#[derive(Debug, Clone)]
pub struct Candidate {
    placement: Placement,
    grid: Grid,
    cost: f32,
}

impl Candidate {
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// The board right after the drop, with full rows still present.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cost(&self) -> f32 {
        self.cost
    }
}

/// Cost of a board before its full rows are cleared. Lower is better.
#[must_use]
pub fn board_cost(grid: &Grid) -> f32 {
    let metrics = BoardMetrics::from_grid(grid);
    let weights = HeuristicPhase::from_max_height(metrics.max_height()).weights();
    as_f32(metrics.aggregate_height()) * weights.aggregate_height
        + as_f32(metrics.holes()) * weights.holes
        + edge_bumpiness(metrics.column_heights()) * weights.bumpiness
        + as_f32(grid.full_rows()) * weights.complete_lines
}

/// Bumpiness with the outermost column pairs at half weight.
#[must_use]
pub fn edge_bumpiness(heights: &[usize; BOARD_WIDTH]) -> f32 {
    iter::zip(heights, &heights[1..])
        .enumerate()
        .map(|(i, (a, b))| {
            let diff = as_f32(a.abs_diff(*b));
            if i == 0 || i == BOARD_WIDTH - 2 {
                diff * 0.5
            } else {
                diff
            }
        })
        .sum()
}

#[expect(clippy::cast_precision_loss)]
fn as_f32(value: usize) -> f32 {
    value as f32
}

/// Every distinct rotation state × column that resolves, in rotation-then-column order.
pub fn candidates(grid: &Grid, piece: PieceKind) -> impl Iterator<Item = Candidate> + '_ {
    (0..piece.rotation_count())
        .flat_map(|rotation| (0..BOARD_WIDTH).map(move |column| (rotation, column)))
        .filter_map(move |(rotation, column)| {
            let action = Action::new(rotation, column).ok()?;
            let placement = Placement::resolve(grid, piece, action)?;
            let mut after = grid.clone();
            placement.apply(&mut after);
            let cost = board_cost(&after);
            Some(Candidate {
                placement,
                grid: after,
                cost,
            })
        })
}

/// Picks the lowest-cost candidate; ties keep the earliest one.
#[must_use]
pub fn best_candidate(grid: &Grid, piece: PieceKind) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates(grid, piece) {
        if best.as_ref().is_none_or(|b| candidate.cost < b.cost) {
            best = Some(candidate);
        }
    }
    best
}

/// Plays [`best_candidate`], falling back to action 0 ([`Action::default`])
/// when nothing fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn select_action(&mut self, grid: &Grid, piece: PieceKind) -> Action {
        match best_candidate(grid, piece) {
            Some(candidate) => candidate.placement().action(),
            None => Action::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gymtris_engine::Cell;

    use super::*;

    fn fill_row_except(grid: &mut Grid, row: usize, gaps: &[usize]) {
        for x in 0..BOARD_WIDTH {
            if !gaps.contains(&x) {
                grid.set_cell(row, x, Cell::Filled(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(HeuristicPhase::from_max_height(0), HeuristicPhase::Early);
        assert_eq!(HeuristicPhase::from_max_height(7), HeuristicPhase::Early);
        assert_eq!(HeuristicPhase::from_max_height(8), HeuristicPhase::Mid);
        assert_eq!(HeuristicPhase::from_max_height(13), HeuristicPhase::Mid);
        assert_eq!(HeuristicPhase::from_max_height(14), HeuristicPhase::Survival);
        assert_eq!(HeuristicPhase::from_max_height(20), HeuristicPhase::Survival);
    }

    #[test]
    fn test_edge_bumpiness_halves_outer_pairs() {
        let heights = [2, 0, 0, 0, 0, 0, 0, 0, 0, 4];
        assert_eq!(edge_bumpiness(&heights), 1.0 + 2.0);
        let heights = [0, 0, 0, 0, 3, 0, 0, 0, 0, 0];
        assert_eq!(edge_bumpiness(&heights), 6.0);
    }

    #[test]
    fn test_board_cost_of_o_in_corner() {
        let mut grid = Grid::EMPTY;
        for (y, x) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            grid.set_cell(y, x, Cell::Filled(PieceKind::O));
        }
        // height 4 × 0.22, bumpiness 2 × 0.35
        let expected = 4.0 * 0.22 + 2.0 * 0.35;
        assert!((board_cost(&grid) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_complete_lines_lower_the_cost() {
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 19, &[]);
        let mut partial = Grid::EMPTY;
        fill_row_except(&mut partial, 19, &[9]);
        assert!(board_cost(&grid) < board_cost(&partial));
    }

    #[test]
    fn test_picks_the_line_clear() {
        // Bottom row open only at columns 6-9: a flat I finishes it.
        let mut grid = Grid::EMPTY;
        fill_row_except(&mut grid, 19, &[6, 7, 8, 9]);
        let action = HeuristicPolicy::new().select_action(&grid, PieceKind::I);
        assert_eq!((action.rotation(), action.column()), (0, 6));
    }

    #[test]
    fn test_candidates_skip_aliased_slots() {
        let count = candidates(&Grid::EMPTY, PieceKind::O).count();
        assert_eq!(count, 9);
        let count = candidates(&Grid::EMPTY, PieceKind::T).count();
        assert!(count > 9);
        assert!(
            candidates(&Grid::EMPTY, PieceKind::T)
                .all(|c| c.placement().action().rotation() < PieceKind::T.rotation_count())
        );
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let best = best_candidate(&Grid::EMPTY, PieceKind::O).unwrap();
        let first_min = candidates(&Grid::EMPTY, PieceKind::O)
            .map(|c| c.cost())
            .fold(f32::INFINITY, f32::min);
        assert_eq!(best.cost(), first_min);
        let earliest = candidates(&Grid::EMPTY, PieceKind::O)
            .find(|c| c.cost() == first_min)
            .unwrap();
        assert_eq!(best.placement(), earliest.placement());
    }

    #[test]
    fn test_falls_back_when_nothing_fits() {
        let mut grid = Grid::EMPTY;
        for x in 0..BOARD_WIDTH {
            grid.set_cell(0, x, Cell::Filled(PieceKind::L));
            grid.set_cell(1, x, Cell::Filled(PieceKind::L));
        }
        assert!(best_candidate(&grid, PieceKind::O).is_none());
        let action = HeuristicPolicy::new().select_action(&grid, PieceKind::O);
        assert_eq!(action.index(), 0);
    }
}
