use gymtris_engine::{Action, Grid, PieceKind};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::policy::Policy;

/// Picks any of the 40 raw actions uniformly, ignoring the board.
///
/// Unplaceable actions are not filtered out, so episodes driven by this
/// policy usually end with an invalid placement.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _grid: &Grid, _piece: PieceKind) -> Action {
        self.rng.random()
    }
}
