use std::ops::Deref;

use serde::{Serialize, Serializer};

use crate::core::{BOARD_HEIGHT, BOARD_WIDTH, BoardMetrics, Grid};

/// Number of grid entries in an observation.
pub const GRID_FEATURES: usize = BOARD_HEIGHT * BOARD_WIDTH;
/// Total observation length: the flattened grid plus three board metrics.
pub const OBSERVATION_LEN: usize = GRID_FEATURES + 3;

/// Divisor applied to colour identifiers.
pub const COLOR_SCALE: f32 = 7.0;
/// Divisor applied to aggregate height.
pub const AGGREGATE_HEIGHT_SCALE: f32 = 200.0;
/// Divisor applied to hole count.
pub const HOLES_SCALE: f32 = 50.0;
/// Divisor applied to bumpiness.
pub const BUMPINESS_SCALE: f32 = 100.0;

/// Fixed-length numeric encoding of a board for the decision-making agent.
///
/// Layout:
///
/// - `[0, 200)`: grid cells in row-major order, each colour identifier ÷ 7
/// - `200`: aggregate height ÷ 200
/// - `201`: hole count ÷ 50
/// - `202`: bumpiness ÷ 100
///
/// The metric scales are fixed constants, not bounds. Values are not clamped
/// and can exceed 1.0 on extreme boards.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation([f32; OBSERVATION_LEN]);

impl Observation {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn encode(grid: &Grid, metrics: &BoardMetrics) -> Self {
        let mut values = [0.0; OBSERVATION_LEN];
        for (value, color_id) in values.iter_mut().zip(grid.color_ids()) {
            *value = f32::from(color_id) / COLOR_SCALE;
        }
        values[GRID_FEATURES] = metrics.aggregate_height() as f32 / AGGREGATE_HEIGHT_SCALE;
        values[GRID_FEATURES + 1] = metrics.holes() as f32 / HOLES_SCALE;
        values[GRID_FEATURES + 2] = metrics.bumpiness() as f32 / BUMPINESS_SCALE;
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// The normalised grid cells.
    #[must_use]
    pub fn grid_features(&self) -> &[f32] {
        &self.0[..GRID_FEATURES]
    }

    /// The normalised `[aggregate height, holes, bumpiness]` triple.
    #[must_use]
    pub fn metric_features(&self) -> [f32; 3] {
        [
            self.0[GRID_FEATURES],
            self.0[GRID_FEATURES + 1],
            self.0[GRID_FEATURES + 2],
        ]
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }
}

impl Deref for Observation {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Observation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}
