//! Bank-template statement parsers.

pub mod pnc_credit;
pub mod pnc_debit;

use anyhow::Result;

use tally_core::Transaction;

use crate::statement::{StatementKind, StatementPeriod};
use crate::text::Page;

/// Parse one decoded statement with the template for its kind.
pub fn parse_statement(
    kind: StatementKind,
    pages: &[Page],
    period: &StatementPeriod,
) -> Result<Vec<Transaction>> {
    match kind {
        StatementKind::BankAccount => pnc_debit::parse_debit_statement(pages, period),
        StatementKind::CreditCard => pnc_credit::parse_credit_statement(pages, period),
    }
}
