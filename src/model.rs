//! Core domain types shared by the ledger, the commands and the engine.

use std::fmt;

use crate::Amount;

/// Account identifier.
pub type AccountId = u16;

/// Overdraft limit given to accounts opened without an explicit one.
pub const DEFAULT_OVERDRAFT_LIMIT: Amount = Amount::new(-500);

/// The primitive balance mutation a leaf command performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deposit,
    Withdraw,
}

impl Action {
    /// The action that reverses this one.
    pub fn inverse(self) -> Self {
        match self {
            Action::Deposit => Action::Withdraw,
            Action::Withdraw => Action::Deposit,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deposit => f.write_str("deposit"),
            Action::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// An instruction representing the possible inputs of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Create an account with the given overdraft limit.
    Open {
        account: AccountId,
        overdraft_limit: Amount,
    },
    /// Credit funds to an account.
    Deposit { account: AccountId, amount: Amount },
    /// Debit funds from an account, bounded by its overdraft limit.
    Withdraw { account: AccountId, amount: Amount },
    /// Move funds between two accounts; nothing happens if the debit fails.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    /// Reverse the most recent successful command.
    Undo,
}
