use std::iter;

use serde::Serialize;

use super::grid::{BOARD_HEIGHT, BOARD_WIDTH, Grid};

/// Surface and structure metrics of a grid, recomputed from scratch.
///
/// - **Column height**: `BOARD_HEIGHT - y` for the topmost filled row `y` of the column, or 0
/// - **Aggregate height**: sum of column heights
/// - **Max height**: tallest column height
/// - **Holes**: empty cells with at least one filled cell above them in the same column
/// - **Bumpiness**: sum of absolute height differences between adjacent columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardMetrics {
    column_heights: [usize; BOARD_WIDTH],
    aggregate_height: usize,
    max_height: usize,
    holes: usize,
    bumpiness: usize,
}

impl BoardMetrics {
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let column_heights = column_heights(grid);
        Self {
            column_heights,
            aggregate_height: column_heights.iter().sum(),
            max_height: column_heights.iter().copied().max().unwrap_or(0),
            holes: count_holes(grid),
            bumpiness: bumpiness(&column_heights),
        }
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize; BOARD_WIDTH] {
        &self.column_heights
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.aggregate_height
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    #[must_use]
    pub fn holes(&self) -> usize {
        self.holes
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        self.bumpiness
    }
}

fn column_heights(grid: &Grid) -> [usize; BOARD_WIDTH] {
    let mut heights = [0; BOARD_WIDTH];
    for (x, h) in heights.iter_mut().enumerate() {
        let top = grid.rows().iter().position(|row| !row[x].is_empty());
        if let Some(y) = top {
            *h = BOARD_HEIGHT - y;
        }
    }
    heights
}

fn count_holes(grid: &Grid) -> usize {
    let mut holes = 0;
    for x in 0..BOARD_WIDTH {
        let mut found_block = false;
        for row in grid.rows() {
            if !row[x].is_empty() {
                found_block = true;
            } else if found_block {
                holes += 1;
            }
        }
    }
    holes
}

fn bumpiness(heights: &[usize; BOARD_WIDTH]) -> usize {
    iter::zip(heights, &heights[1..])
        .map(|(a, b)| a.abs_diff(*b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PieceKind};

    const X: Cell = Cell::Filled(PieceKind::J);

    #[test]
    fn test_empty_grid_metrics() {
        let metrics = BoardMetrics::from_grid(&Grid::EMPTY);
        assert_eq!(metrics.column_heights(), &[0; BOARD_WIDTH]);
        assert_eq!(metrics.aggregate_height(), 0);
        assert_eq!(metrics.max_height(), 0);
        assert_eq!(metrics.holes(), 0);
        assert_eq!(metrics.bumpiness(), 0);
    }

    #[test]
    fn test_heights_and_bumpiness() {
        let mut grid = Grid::EMPTY;
        // Column 0: height 3. Column 1: height 1. Column 4: height 2.
        grid.set_cell(17, 0, X);
        grid.set_cell(19, 1, X);
        grid.set_cell(18, 4, X);

        let metrics = BoardMetrics::from_grid(&grid);
        assert_eq!(
            metrics.column_heights(),
            &[3, 1, 0, 0, 2, 0, 0, 0, 0, 0]
        );
        assert_eq!(metrics.aggregate_height(), 6);
        assert_eq!(metrics.max_height(), 3);
        // |3-1| + |1-0| + 0 + |0-2| + |2-0| = 7
        assert_eq!(metrics.bumpiness(), 7);
    }

    #[test]
    fn test_holes_counted_below_first_block_only() {
        let mut grid = Grid::EMPTY;
        // Column 2: block at row 15, empty 16-18, block at 19 -> 3 holes.
        grid.set_cell(15, 2, X);
        grid.set_cell(19, 2, X);
        // Column 5: floating block at row 10 -> rows 11-19 are holes (9).
        grid.set_cell(10, 5, X);

        let metrics = BoardMetrics::from_grid(&grid);
        assert_eq!(metrics.holes(), 12);
        assert_eq!(metrics.column_heights()[2], 5);
        assert_eq!(metrics.column_heights()[5], 10);
    }

    #[test]
    fn test_max_height_agrees_with_row_scan() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(4, 9, X);
        grid.set_cell(12, 0, X);
        let metrics = BoardMetrics::from_grid(&grid);
        assert_eq!(metrics.max_height(), grid.max_height());
        assert_eq!(metrics.max_height(), 16);
    }
}
