//! Error types for account and ledger operations.

use thiserror::Error;

use crate::Amount;
use crate::model::AccountId;

/// A withdrawal would have taken the balance below the overdraft limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("balance {balance}, requested {requested}, overdraft limit {overdraft_limit}")]
pub struct InsufficientFunds {
    pub balance: Amount,
    pub requested: Amount,
    pub overdraft_limit: Amount,
}

/// A deposit would have taken the balance past the largest [`Amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("balance {balance} cannot take a further {requested}")]
pub struct BalanceOverflow {
    pub balance: Amount,
    pub requested: Amount,
}

/// Error returned by [`Ledger`](super::Ledger) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),

    #[error("negative amount {1} for account {0}")]
    NegativeAmount(AccountId, Amount),

    #[error("balance overflow in account {0}: {1}")]
    Overflow(AccountId, #[source] BalanceOverflow),

    #[error("insufficient funds in account {0}: {1}")]
    InsufficientFunds(AccountId, #[source] InsufficientFunds),
}
