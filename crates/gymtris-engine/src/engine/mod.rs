//! Session logic built on the core board and piece data.
//!
//! - [`TetrisEnv`] - One session advanced through `reset` / `step`
//! - [`Action`] - The `rotation × 10 + column` action encoding
//! - [`PlacementAnalysis`] - What-if evaluation of one placement
//! - [`Observation`] - Fixed-length numeric board encoding
//! - [`RewardConfig`] / [`EnvConfig`] - Reward shaping parameters
//! - [`SessionStats`] - Score and line counters
//! - [`EnvSeed`] - Seed for deterministic piece generation
//! - [`PredictionRequest`] / [`PredictionResponse`] - Prediction service messages
//!
//! # Step Flow
//!
//! 1. Decode the action into a rotation slot and a column
//! 2. Reduce the slot modulo the active piece's rotation count
//! 3. Drop the piece straight down from row 0; if it never fits, terminate with −500
//! 4. Commit the piece, clear full lines, and measure the board
//! 5. Reward line clears and penalise height, holes and bumpiness
//! 6. Terminate with an extra −200 if the stack reached height 18, otherwise draw the next piece

pub use self::{
    action::*, config::*, env::*, observation::*, placement::*, prediction::*, seed::*, stats::*,
};

mod action;
mod config;
mod env;
mod observation;
mod placement;
mod prediction;
mod seed;
mod stats;
