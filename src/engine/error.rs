//! Error types for instruction processing.

use thiserror::Error;

use crate::command::UndoError;
use crate::ledger::LedgerError;

/// Top-level error returned by [`Engine::apply`](super::Engine::apply).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("open failed: {0}")]
    Open(#[from] LedgerError),

    #[error("{0} was rejected")]
    CommandFailed(CommandKind),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("undo failed: {0}")]
    Undo(#[from] UndoError),
}

/// The kind of command an instruction built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::Deposit => f.write_str("deposit"),
            CommandKind::Withdraw => f.write_str("withdraw"),
            CommandKind::Transfer => f.write_str("transfer"),
        }
    }
}
