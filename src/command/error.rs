use thiserror::Error;

use crate::Amount;
use crate::ledger::LedgerError;
use crate::model::{AccountId, Action};

/// Error returned when an undo could not reverse every effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    /// The inverse action of a leaf command was rejected by the ledger.
    /// The original effect is still in place.
    #[error("could not reverse {action} of {amount} on account {account}: {source}")]
    Reversal {
        account: AccountId,
        action: Action,
        amount: Amount,
        source: LedgerError,
    },

    /// Some steps of a composite could not be reversed; the others were.
    #[error("{} step(s) could not be reversed", .0.len())]
    Incomplete(Vec<UndoError>),
}

impl UndoError {
    /// Flattened list of the leaf reversals that failed.
    pub fn failures(&self) -> Vec<&UndoError> {
        match self {
            UndoError::Reversal { .. } => vec![self],
            UndoError::Incomplete(errors) => errors.iter().flat_map(UndoError::failures).collect(),
        }
    }

    /// Gather step failures into a single error: `None` for no failure, the
    /// failure itself when there is only one.
    pub(crate) fn collect(mut errors: Vec<UndoError>) -> Option<UndoError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(UndoError::Incomplete(errors)),
        }
    }
}
