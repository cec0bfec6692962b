//! Deterministic falling-block puzzle simulation for reinforcement learning.
//!
//! - [`core`] - Piece catalog, grid, and board metrics
//! - [`engine`] - Sessions, actions, rewards, and observations
//!
//! # Example
//!
//! ```
//! use gymtris_engine::{EnvSeed, TetrisEnv};
//!
//! let mut env = TetrisEnv::with_seed(EnvSeed::from(7));
//! let observation = env.reset();
//! assert_eq!(observation.len(), 203);
//!
//! let outcome = env.step(0).unwrap();
//! println!("reward {} terminated {}", outcome.reward, outcome.terminated);
//! ```

use std::num::ParseIntError;

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("action {index} is outside 0..40")]
    OutOfRange { index: usize },
    #[display("rotation slot {rotation} is outside 0..4")]
    RotationOutOfRange { rotation: usize },
    #[display("column {column} is outside 0..10")]
    ColumnOutOfRange { column: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StepError {
    #[display("invalid action: {_0}")]
    ActionOutOfRange(ActionError),
    #[display("session has terminated; reset before stepping again")]
    Terminated,
}

impl From<ActionError> for StepError {
    fn from(err: ActionError) -> Self {
        StepError::ActionOutOfRange(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    #[display("expected 20 rows of 10 cells, got {rows} rows with {columns} cells")]
    Dimensions { rows: usize, columns: usize },
    #[display("cell ({row}, {column}) holds {value}, expected 0-7")]
    InvalidCell { row: usize, column: usize, value: u8 },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PredictionError {
    #[display("invalid action: {_0}")]
    Action(ActionError),
    #[display("action {action} does not encode rotation {rotation} and column {x}")]
    Mismatch {
        action: usize,
        rotation: usize,
        x: usize,
    },
}

impl From<ActionError> for PredictionError {
    fn from(err: ActionError) -> Self {
        PredictionError::Action(err)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("seed must be 32 hex digits, got {len} characters")]
    Length { len: usize },
    #[display("invalid hex seed: {_0}")]
    Digits(ParseIntError),
}
