pub use self::{grid::*, metrics::*, piece::*};

pub(crate) mod grid;
pub(crate) mod metrics;
pub(crate) mod piece;
