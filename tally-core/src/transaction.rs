//! The extracted transaction record.

use serde::{Deserialize, Serialize};

use crate::date::StatementDate;
use crate::money::Money;

/// One transaction extracted from a statement.
///
/// Immutable once produced; the caller owns persistence and dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: StatementDate,
    pub value: Money,
    pub description: String,
}
