use crate::Amount;
use crate::model::AccountId;

use super::{DependentComposite, LeafCommand};

/// Move `amount` from one account to another.
///
/// The deposit leg only runs if the withdrawal succeeded, so a transfer
/// rejected by the overdraft limit leaves both balances unchanged. Undo
/// reverses the deposit first, then the withdrawal.
pub fn transfer(from: AccountId, to: AccountId, amount: Amount) -> DependentComposite {
    DependentComposite::new(vec![
        Box::new(LeafCommand::withdraw(from, amount)),
        Box::new(LeafCommand::deposit(to, amount)),
    ])
}
