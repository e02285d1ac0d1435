//! Account table.
//!
//! Commands never own accounts: they hold an [`AccountId`] and act on the
//! ledger handed to them. Accounts are never removed, so an id stays valid
//! for as long as the ledger that issued it.

use std::collections::BTreeMap;
use tracing::debug;

use crate::Amount;
use crate::model::AccountId;

mod state;
pub use state::Account;

mod error;
pub use error::{BalanceOverflow, InsufficientFunds, LedgerError};

#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
}

/// Public API.
impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Open a new account with a zero balance.
    pub fn open(
        &mut self,
        id: AccountId,
        overdraft_limit: Amount,
    ) -> Result<&Account, LedgerError> {
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }
        debug!(account = id, overdraft_limit = %overdraft_limit, "account opened");
        Ok(self
            .accounts
            .entry(id)
            .or_insert_with(|| Account::new(id, overdraft_limit)))
    }

    /// Return one account.
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Return all accounts in ascending id order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.values()
    }

    /// Sum of all balances, widened so it cannot overflow.
    pub fn total(&self) -> i128 {
        self.accounts
            .values()
            .map(|account| i128::from(account.balance().value()))
            .sum()
    }

    /// Credit `amount` to an account and return its new balance.
    pub fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        let account = self.account_mut(id, amount)?;
        account
            .deposit(amount)
            .map_err(|e| LedgerError::Overflow(id, e))?;
        debug!(account = id, amount = %amount, balance = %account.balance(), "deposited");
        Ok(account.balance())
    }

    /// Debit `amount` from an account and return its new balance. Fails
    /// without touching the balance when the overdraft limit would be crossed.
    pub fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        let account = self.account_mut(id, amount)?;
        account
            .withdraw(amount)
            .map_err(|e| LedgerError::InsufficientFunds(id, e))?;
        debug!(account = id, amount = %amount, balance = %account.balance(), "withdrew");
        Ok(account.balance())
    }
}

/// Private API.
impl Ledger {
    /// Look up an account for a mutation of `amount`.
    fn account_mut(
        &mut self,
        id: AccountId,
        amount: Amount,
    ) -> Result<&mut Account, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(id, amount));
        }
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))
    }
}
