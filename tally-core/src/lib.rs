//! tally-core: value types shared by the statement extraction pipeline.

pub mod date;
pub mod money;
pub mod transaction;

pub use date::{MonthDay, StatementDate};
pub use money::Money;
pub use transaction::Transaction;
