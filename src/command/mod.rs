//! Reversible commands over a [`Ledger`].
//!
//! A [`LeafCommand`] deposits to or withdraws from one account and records
//! whether it succeeded. Composites group commands into one undoable unit:
//! [`SequentialComposite`] runs every step, [`DependentComposite`] stops at
//! the first failure. [`transfer`] builds the two-leg dependent composite
//! that moves funds between accounts.
//!
//! Composite execute and undo are not atomic: another command touching the
//! same account between two steps observes the intermediate state.

use std::fmt;

use tracing::{debug, warn};

use crate::Amount;
use crate::ledger::{Ledger, LedgerError};
use crate::model::{AccountId, Action};

mod composite;
pub use composite::{DependentComposite, SequentialComposite};

mod transfer;
pub use transfer::transfer;

mod error;
pub use error::UndoError;

/// An executable, reversible unit of work against a ledger.
pub trait Command: fmt::Debug {
    /// Run the command. The outcome is only observable through
    /// [`succeeded`](Command::succeeded).
    fn execute(&mut self, ledger: &mut Ledger);

    /// Reverse the effects that actually took place. Safe to call any number
    /// of times; does nothing for a command that did not succeed.
    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), UndoError>;

    /// Whether the last execution took effect and has not been undone.
    fn succeeded(&self) -> bool;

    /// Mark the command as never executed.
    fn skip(&mut self);
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn execute(&mut self, ledger: &mut Ledger) {
        (**self).execute(ledger)
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), UndoError> {
        (**self).undo(ledger)
    }

    fn succeeded(&self) -> bool {
        (**self).succeeded()
    }

    fn skip(&mut self) {
        (**self).skip()
    }
}

/// Lifecycle of a [`LeafCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Created,
    Succeeded,
    Failed,
    /// Not attempted because an earlier step of a dependent composite failed.
    Skipped,
    Undone,
}

/// A single deposit or withdrawal against one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCommand {
    account: AccountId,
    action: Action,
    amount: Amount,
    state: CommandState,
}

impl LeafCommand {
    pub fn new(account: AccountId, action: Action, amount: Amount) -> Self {
        Self {
            account,
            action,
            amount,
            state: CommandState::Created,
        }
    }

    pub fn deposit(account: AccountId, amount: Amount) -> Self {
        Self::new(account, Action::Deposit, amount)
    }

    pub fn withdraw(account: AccountId, amount: Amount) -> Self {
        Self::new(account, Action::Withdraw, amount)
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    fn perform(&self, action: Action, ledger: &mut Ledger) -> Result<Amount, LedgerError> {
        match action {
            Action::Deposit => ledger.deposit(self.account, self.amount),
            Action::Withdraw => ledger.withdraw(self.account, self.amount),
        }
    }
}

impl Command for LeafCommand {
    fn execute(&mut self, ledger: &mut Ledger) {
        self.state = match self.perform(self.action, ledger) {
            Ok(_) => CommandState::Succeeded,
            Err(e) => {
                debug!(
                    account = self.account,
                    action = %self.action,
                    reason = %e,
                    "command failed"
                );
                CommandState::Failed
            }
        };
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), UndoError> {
        if self.state != CommandState::Succeeded {
            return Ok(());
        }

        let inverse = self.action.inverse();
        match self.perform(inverse, ledger) {
            Ok(_) => {
                self.state = CommandState::Undone;
                Ok(())
            }
            Err(source) => {
                // a deposit undone by a withdrawal can hit the overdraft limit,
                // a withdrawal undone by a deposit can overflow the balance
                warn!(
                    account = self.account,
                    action = %self.action,
                    amount = %self.amount,
                    reason = %source,
                    "undo failed"
                );
                Err(UndoError::Reversal {
                    account: self.account,
                    action: self.action,
                    amount: self.amount,
                    source,
                })
            }
        }
    }

    fn succeeded(&self) -> bool {
        self.state == CommandState::Succeeded
    }

    fn skip(&mut self) {
        self.state = CommandState::Skipped;
    }
}
