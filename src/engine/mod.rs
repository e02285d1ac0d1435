//! Instruction processing engine.
//!
//! The engine owns a ledger and the history of commands that took effect.
//! Deposits, withdrawals and transfers are run as reversible commands and
//! `Undo` reverses the most recent one. Also supports async stream of
//! instructions.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::command::{Command, LeafCommand, transfer};
use crate::ledger::Ledger;
use crate::model::Instruction;

mod error;
pub use error::{CommandKind, EngineError};

pub struct Engine {
    ledger: Ledger,
    /// Commands that took effect, most recent last.
    history: Vec<Box<dyn Command>>,
}

/// Public API.
impl Engine {
    pub fn new() -> Self {
        Self::with_ledger(Ledger::new())
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger,
            history: Vec::new(),
        }
    }

    /// Run the engine with the given instruction stream.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Instruction> + Unpin) {
        while let Some(instruction) = stream.next().await {
            // a rejected instruction must not stop the engine
            let _ = self.apply(instruction);
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Number of commands that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Apply a single instruction on top of the current ledger state.
    pub fn apply(&mut self, instruction: Instruction) -> Result<(), EngineError> {
        let (name, result) = match instruction {
            Instruction::Open {
                account,
                overdraft_limit,
            } => {
                let result = self
                    .ledger
                    .open(account, overdraft_limit)
                    .map(|_| ())
                    .map_err(EngineError::from);
                ("open", result)
            }
            Instruction::Deposit { account, amount } => (
                "deposit",
                self.execute(
                    CommandKind::Deposit,
                    Box::new(LeafCommand::deposit(account, amount)),
                ),
            ),
            Instruction::Withdraw { account, amount } => (
                "withdraw",
                self.execute(
                    CommandKind::Withdraw,
                    Box::new(LeafCommand::withdraw(account, amount)),
                ),
            ),
            Instruction::Transfer { from, to, amount } => (
                "transfer",
                self.execute(CommandKind::Transfer, Box::new(transfer(from, to, amount))),
            ),
            Instruction::Undo => ("undo", self.undo_last()),
        };

        match &result {
            Ok(()) => info!(
                depth = self.history.len(),
                total = self.ledger.total(),
                "{name} applied"
            ),
            Err(e) => info!(reason = %e, "{name} skipped"),
        }
        result
    }
}

/// Private API.
impl Engine {
    /// Execute a command and record it if it took effect. A command that
    /// failed halfway is rolled back so a rejected instruction has no effect.
    /// If the rollback itself is incomplete the command is recorded anyway so
    /// that `Undo` can retry the effects still in place.
    fn execute(
        &mut self,
        kind: CommandKind,
        mut cmd: Box<dyn Command>,
    ) -> Result<(), EngineError> {
        cmd.execute(&mut self.ledger);
        if cmd.succeeded() {
            self.history.push(cmd);
            return Ok(());
        }

        if let Err(e) = cmd.undo(&mut self.ledger) {
            warn!(command = %kind, reason = %e, "partial effect could not be rolled back");
            self.history.push(cmd);
        }
        Err(EngineError::CommandFailed(kind))
    }

    /// Undo the most recent command. If some of its effects cannot be
    /// reversed it goes back on the history; its reversed steps are already
    /// inert so a later undo only retries the rest.
    fn undo_last(&mut self) -> Result<(), EngineError> {
        let mut cmd = self.history.pop().ok_or(EngineError::NothingToUndo)?;
        if let Err(e) = cmd.undo(&mut self.ledger) {
            self.history.push(cmd);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
