mod expense;
mod filter;
mod ledger;
mod money;

pub use expense::*;
pub use filter::*;
pub use ledger::*;
pub use money::*;
