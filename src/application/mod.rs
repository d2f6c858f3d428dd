// Application layer - the expense store and the reports built on top of it.
// Clients (CLI, interactive menu, charts) go through `ExpenseLedger` and never
// touch storage directly.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
