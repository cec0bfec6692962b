use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GridError;

use super::piece::{PieceKind, RotationState};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board. Row 0 is the top.
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the grid.
///
/// The colour identifier of a cell is 0 when empty and the piece's
/// [`PieceKind::color_id`] (1-7) when filled, so no other value can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color_id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.color_id(),
        }
    }

    #[must_use]
    pub fn from_color_id(color_id: u8) -> Option<Self> {
        if color_id == 0 {
            return Some(Cell::Empty);
        }
        PieceKind::from_color_id(color_id).map(Cell::Filled)
    }
}

pub type GridRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: GridRow = [Cell::Empty; BOARD_WIDTH];

/// The playfield: `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells, row-major, row 0 at the top.
///
/// Serialised as 20 rows of 10 colour identifiers. Deserialisation rejects
/// any other shape and any value outside 0-7.
///
/// # Example
///
/// ```
/// use gymtris_engine::{Grid, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// let shape = PieceKind::O.rotation(0);
/// let row = grid.drop_row(shape, 0).unwrap();
/// assert_eq!(row, 18);
/// grid.fill_shape(shape, row, 0, PieceKind::O);
/// assert_eq!(grid.occupied_cells(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "[[u8; BOARD_WIDTH]; BOARD_HEIGHT]",
    try_from = "Vec<Vec<u8>>"
)]
pub struct Grid {
    rows: [GridRow; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn rows(&self) -> &[GridRow; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.rows[row][column]
    }

    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        self.rows[row][column] = cell;
    }

    /// Returns every cell's colour identifier in row-major order.
    pub fn color_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flatten().map(|cell| cell.color_id())
    }

    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| !cell.is_empty())
    }

    /// Number of rows with no empty cell.
    #[must_use]
    pub fn full_rows(&self) -> usize {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_full(y)).count()
    }

    /// Checks whether `shape` fits with its box origin at `(row, column)`.
    ///
    /// A cell collides when it lies outside `[0, BOARD_WIDTH)` horizontally,
    /// at or below `BOARD_HEIGHT`, or on a filled cell. Cells above the top
    /// edge (negative rows) never collide.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn can_place(&self, shape: RotationState, row: isize, column: usize) -> bool {
        shape.occupied_offsets().all(|(dy, dx)| {
            let x = column + dx;
            if x >= BOARD_WIDTH {
                return false;
            }
            let y = row + dy as isize;
            let Ok(y) = usize::try_from(y) else {
                return true;
            };
            y < BOARD_HEIGHT && self.rows[y][x].is_empty()
        })
    }

    /// Resolves the landing row of `shape` dropped straight down in `column`.
    ///
    /// The search starts at row 0 and advances while the next row down still
    /// fits. Returns `None` when the final candidate does not fit either,
    /// which happens when the piece is blocked at the top or pokes out of the
    /// side of the board.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn drop_row(&self, shape: RotationState, column: usize) -> Option<usize> {
        let mut row = 0;
        while row < BOARD_HEIGHT && self.can_place(shape, row as isize + 1, column) {
            row += 1;
        }
        self.can_place(shape, row as isize, column)
            .then_some(row)
    }

    /// Writes `kind`'s colour into every cell of `shape` at `(row, column)`.
    ///
    /// Cells outside the board are skipped. Returns the number of cells written.
    pub fn fill_shape(
        &mut self,
        shape: RotationState,
        row: usize,
        column: usize,
        kind: PieceKind,
    ) -> usize {
        let mut written = 0;
        for (dy, dx) in shape.occupied_offsets() {
            let (y, x) = (row + dy, column + dx);
            if y < BOARD_HEIGHT && x < BOARD_WIDTH {
                self.rows[y][x] = Cell::Filled(kind);
                written += 1;
            }
        }
        written
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows are scanned bottom to top. Every full row is dropped, the rows
    /// above it move down to close the gap, and empty rows fill the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Height of the tallest column, from the topmost row that holds any block.
    #[must_use]
    pub fn max_height(&self) -> usize {
        self.rows
            .iter()
            .position(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |y| BOARD_HEIGHT - y)
    }
}

impl From<Grid> for [[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
    fn from(grid: Grid) -> Self {
        grid.rows.map(|row| row.map(Cell::color_id))
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_HEIGHT {
            return Err(GridError::Dimensions {
                rows: rows.len(),
                columns: rows.first().map_or(0, Vec::len),
            });
        }
        let mut grid = Grid::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_WIDTH {
                return Err(GridError::Dimensions {
                    rows: rows.len(),
                    columns: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                grid.rows[y][x] = Cell::from_color_id(value).ok_or(GridError::InvalidCell {
                    row: y,
                    column: x,
                    value,
                })?;
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                f.write_str(if cell.is_empty() { "·" } else { "█" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
