//! Wire schema shared with an external prediction service.
//!
//! A prediction service receives the current board and the active piece and
//! answers with an action in the engine's own encoding, so that its answer
//! can be fed straight back into [`TetrisEnv::step`](super::TetrisEnv::step).
//! Only the message shapes live here; transport is up to the caller.
//!
//! ```json
//! { "board": [[0, 0, ...], ...], "currentPiece": "T" }
//! { "action": 23, "rotation": 2, "x": 3 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    PredictionError,
    core::{Grid, PieceKind},
};

use super::action::Action;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub board: Grid,
    pub current_piece: PieceKind,
}

/// An action in both its packed and unpacked forms.
///
/// `action` must equal `rotation × 10 + x`; [`Self::into_action`] checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub action: usize,
    pub rotation: usize,
    pub x: usize,
}

impl From<Action> for PredictionResponse {
    fn from(action: Action) -> Self {
        Self {
            action: action.index(),
            rotation: action.rotation(),
            x: action.column(),
        }
    }
}

impl PredictionResponse {
    pub fn into_action(self) -> Result<Action, PredictionError> {
        let action = Action::from_index(self.action)?;
        if action.rotation() != self.rotation || action.column() != self.x {
            return Err(PredictionError::Mismatch {
                action: self.action,
                rotation: self.rotation,
                x: self.x,
            });
        }
        Ok(action)
    }
}
