//! What-if evaluation of a single piece placement.
//!
//! [`PlacementAnalysis`] resolves where an action drops a piece, commits it to a
//! copy of the grid, clears lines and measures the result. The engine uses it
//! to advance a session, and agents use it to compare candidate actions
//! without touching the session.

use serde::{Deserialize, Serialize};

use crate::core::{BoardMetrics, Grid, PieceKind, RotationState};

use super::action::Action;

/// Where a piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    kind: PieceKind,
    action: Action,
    rotation_index: usize,
    row: usize,
}

impl Placement {
    /// Resolves the landing position of `kind` for `action`, or `None` if it cannot be placed.
    #[must_use]
    pub fn resolve(grid: &Grid, kind: PieceKind, action: Action) -> Option<Self> {
        let rotation_index = action.rotation() % kind.rotation_count();
        let row = grid.drop_row(kind.rotation(rotation_index), action.column())?;
        Some(Self {
            kind,
            action,
            rotation_index,
            row,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Rotation state actually used, after reducing the action's slot.
    #[must_use]
    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    #[must_use]
    pub fn shape(&self) -> RotationState {
        self.kind.rotation(self.rotation_index)
    }

    /// Row of the shape's bitmap origin.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.action.column()
    }

    /// Writes the piece into `grid` and returns the number of cells written.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        grid.fill_shape(self.shape(), self.row, self.column(), self.kind)
    }
}

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    placement: Placement,
    cleared_lines: usize,
    grid: Grid,
    metrics: BoardMetrics,
}

impl PlacementAnalysis {
    /// Simulates dropping `kind` with `action` on a copy of `before_placement`.
    ///
    /// Returns `None` when the piece cannot be placed.
    #[must_use]
    pub fn simulate(before_placement: &Grid, kind: PieceKind, action: Action) -> Option<Self> {
        let placement = Placement::resolve(before_placement, kind, action)?;
        let mut grid = before_placement.clone();
        placement.apply(&mut grid);
        let cleared_lines = grid.clear_lines();
        let metrics = BoardMetrics::from_grid(&grid);
        Some(Self {
            placement,
            cleared_lines,
            grid,
            metrics,
        })
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// The grid after the piece is committed and lines are cleared.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Metrics of [`Self::grid`].
    #[must_use]
    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
