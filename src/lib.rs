pub mod amount;
pub mod command;
pub mod csv;
pub mod engine;
pub mod ledger;
pub mod model;

pub use amount::Amount;
pub use command::{Command, DependentComposite, LeafCommand, SequentialComposite, transfer};
pub use engine::Engine;
pub use ledger::{Account, Ledger};
pub use model::{AccountId, Action, Instruction};
