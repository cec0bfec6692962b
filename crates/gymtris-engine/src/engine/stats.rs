use serde::{Deserialize, Serialize};

/// Cumulative counters of one session.
///
/// - **Score**: sum of committed step rewards, each truncated toward zero
/// - **Total cleared lines**: lines removed across all placements
/// - **Completed pieces**: placements committed to the grid
/// - **Line clear distribution**: placements clearing 0, 1, 2, 3 and 4+ lines
///
/// Piece and line counters only grow between resets; the score follows the
/// sign of the rewards. An unplaceable piece ends the session without
/// touching any counter.
///
/// # Example
///
/// ```
/// use gymtris_engine::SessionStats;
///
/// let mut stats = SessionStats::new();
/// stats.complete_placement(2, 287.5);
/// stats.complete_placement(0, -3.9);
///
/// assert_eq!(stats.score(), 284);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    score: i64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of placements by lines cleared.
    ///
    /// Index 4 counts every placement clearing four or more lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a committed placement and its final step reward.
    #[expect(clippy::cast_possible_truncation)]
    pub fn complete_placement(&mut self, cleared_lines: usize, reward: f32) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        self.score += reward.trunc() as i64;
    }
}
