use serde::{Deserialize, Serialize};

use crate::core::BoardMetrics;

/// Reward shaping parameters.
///
/// The defaults are the standard values: 100/300/500/800 for 1/2/3/4+ lines,
/// penalties of 0.5 per unit of aggregate height, 3 per hole and 0.5 per unit
/// of bumpiness, −500 for an unplaceable piece, and an extra −200 when the
/// stack reaches height 18.
///
/// Every field is optional when deserialising; missing fields take their
/// default value.
///
/// # Example
///
/// ```
/// use gymtris_engine::RewardConfig;
///
/// let config: RewardConfig = serde_json::from_str(r#"{ "hole_weight": 5.0 }"#).unwrap();
/// assert_eq!(config.hole_weight, 5.0);
/// assert_eq!(config.top_out_height, 18);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Base reward indexed by lines cleared in one step (index 4 covers 4 or more).
    pub line_clear_rewards: [f32; 5],
    pub height_weight: f32,
    pub hole_weight: f32,
    pub bumpiness_weight: f32,
    /// Reward of a step whose piece cannot be placed.
    pub invalid_placement_reward: f32,
    /// Max column height at or above which the session tops out.
    pub top_out_height: usize,
    /// Subtracted from the step reward on top-out.
    pub top_out_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            line_clear_rewards: [0.0, 100.0, 300.0, 500.0, 800.0],
            height_weight: 0.5,
            hole_weight: 3.0,
            bumpiness_weight: 0.5,
            invalid_placement_reward: -500.0,
            top_out_height: 18,
            top_out_penalty: 200.0,
        }
    }
}

impl RewardConfig {
    #[must_use]
    pub fn line_clear_reward(&self, cleared_lines: usize) -> f32 {
        let last = self.line_clear_rewards.len() - 1;
        self.line_clear_rewards[cleared_lines.min(last)]
    }

    /// Reward of a committed placement, before any top-out penalty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn placement_reward(&self, cleared_lines: usize, metrics: &BoardMetrics) -> f32 {
        self.line_clear_reward(cleared_lines)
            - self.height_weight * metrics.aggregate_height() as f32
            - self.hole_weight * metrics.holes() as f32
            - self.bumpiness_weight * metrics.bumpiness() as f32
    }

    #[must_use]
    pub fn is_top_out(&self, metrics: &BoardMetrics) -> bool {
        metrics.max_height() >= self.top_out_height
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub reward: RewardConfig,
}

impl EnvConfig {
    #[must_use]
    pub fn with_reward(reward: RewardConfig) -> Self {
        Self { reward }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Grid, PieceKind};

    #[test]
    fn test_line_clear_table() {
        let config = RewardConfig::default();
        let rewards: Vec<_> = (0..=6).map(|n| config.line_clear_reward(n)).collect();
        assert_eq!(rewards, [0.0, 100.0, 300.0, 500.0, 800.0, 800.0, 800.0]);
    }

    #[test]
    fn test_placement_reward_on_empty_board_is_line_bonus() {
        let config = RewardConfig::default();
        let metrics = BoardMetrics::from_grid(&Grid::EMPTY);
        assert_eq!(config.placement_reward(1, &metrics), 100.0);
        assert_eq!(config.placement_reward(2, &metrics), 300.0);
        assert_eq!(config.placement_reward(3, &metrics), 500.0);
        assert_eq!(config.placement_reward(4, &metrics), 800.0);
    }

    #[test]
    fn test_placement_reward_penalties() {
        let mut grid = Grid::EMPTY;
        // Column 0 height 2 with one hole, column 1 height 0.
        grid.set_cell(18, 0, Cell::Filled(PieceKind::S));
        let metrics = BoardMetrics::from_grid(&grid);
        // aggregate 2, holes 1, bumpiness 2 -> -(1 + 3 + 1)
        assert_eq!(RewardConfig::default().placement_reward(0, &metrics), -5.0);
    }

    #[test]
    fn test_partial_config_json() {
        let config: EnvConfig =
            serde_json::from_str(r#"{ "reward": { "top_out_penalty": 50.0 } }"#).unwrap();
        assert_eq!(config.reward.top_out_penalty, 50.0);
        assert_eq!(config.reward.height_weight, 0.5);
    }
}
