//! Action-selection policies for driving a [`TetrisEnv`](gymtris_engine::TetrisEnv).
//!
//! Two levels mirror how a session is played:
//!
//! 1. **Policy** ([`policy`]) - picks one action for the current board and piece.
//! 2. **Episode** ([`policy::run_episode`]) - resets an engine and steps it with a
//!    policy until the session terminates or a step limit is hit.
//!
//! Provided policies:
//!
//! - [`RandomPolicy`] - uniform over the 40 raw actions, including unplaceable ones
//! - [`HeuristicPolicy`] - greedy one-piece lookahead scored by weighted board features
//!
//! # Example
//!
//! ```
//! use gymtris_agent::{HeuristicPolicy, run_episode};
//! use gymtris_engine::{EnvSeed, TetrisEnv};
//!
//! let mut env = TetrisEnv::with_seed(EnvSeed::from(5));
//! let mut policy = HeuristicPolicy::new();
//! let summary = run_episode(&mut env, &mut policy, 50, |_, _| {});
//! assert!(summary.steps <= 50);
//! ```

pub use self::{heuristic::*, policy::*, random::*};

pub mod heuristic;
pub mod policy;
pub mod random;
