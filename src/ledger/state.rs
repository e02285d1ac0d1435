use std::fmt;

use crate::Amount;
use crate::model::{AccountId, DEFAULT_OVERDRAFT_LIMIT};

use super::error::{BalanceOverflow, InsufficientFunds};

/// A balance holder whose withdrawals are bounded by an overdraft limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Amount,
    overdraft_limit: Amount,
}

impl Account {
    pub fn new(id: AccountId, overdraft_limit: Amount) -> Self {
        Self {
            id,
            balance: Amount::ZERO,
            overdraft_limit,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn overdraft_limit(&self) -> Amount {
        self.overdraft_limit
    }

    /// Add `amount` to the balance. Deposits have no limit of their own but
    /// are rejected when the balance would not fit in an [`Amount`].
    pub fn deposit(&mut self, amount: Amount) -> Result<(), BalanceOverflow> {
        debug_assert!(!amount.is_negative(), "negative deposit {amount}");
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BalanceOverflow {
                balance: self.balance,
                requested: amount,
            })?;
        Ok(())
    }

    /// Remove `amount` from the balance unless it would drop below the
    /// overdraft limit, in which case the balance is left untouched.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), InsufficientFunds> {
        debug_assert!(!amount.is_negative(), "negative withdrawal {amount}");
        match self.balance.checked_sub(amount) {
            Some(rest) if rest >= self.overdraft_limit => {
                self.balance = rest;
                Ok(())
            }
            _ => Err(InsufficientFunds {
                balance: self.balance,
                requested: amount,
                overdraft_limit: self.overdraft_limit,
            }),
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(0, DEFAULT_OVERDRAFT_LIMIT)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account {}: balance is {}", self.id, self.balance)
    }
}
