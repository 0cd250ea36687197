//! PNC credit card statement parser (positioned text).
//!
//! Purchases print as one table per page under a two-line column header,
//! "Transaction" over "date". Every transaction date sits in that header's
//! column; the rest of the row is `[.., posting date, description, amount]`
//! on the same baseline. The first page prints a "+ Purchases" total the
//! extracted sum must match.

use anyhow::{Context, Result, ensure};

use tally_core::{Money, MonthDay, Transaction};

use crate::statement::StatementPeriod;
use crate::text::{Page, row};

const HEADER_TOP: &str = "Transaction";
const HEADER_BOTTOM: &str = "date";
const PURCHASES_LABEL: &str = "+ Purchases";

/// Extract every purchase from a credit card statement and reconcile the
/// sum against the printed purchases total.
pub fn parse_credit_statement(
    pages: &[Page],
    period: &StatementPeriod,
) -> Result<Vec<Transaction>> {
    let first = pages.first().context("statement has no pages")?;
    let label = first
        .iter()
        .position(|f| f.text == PURCHASES_LABEL)
        .context("no + Purchases summary")?;
    let total_fragment = first
        .get(label + 1)
        .context("no amount after + Purchases")?;
    ensure!(
        total_fragment.y == first[label].y,
        "+ Purchases amount is not beside its label"
    );
    let total = Money::load(&total_fragment.text)?;

    let mut transactions = Vec::new();

    for page in pages {
        // Pages without the purchases table (dividers, totals) contribute
        // nothing.
        let Some(top) = page.iter().find(|f| f.text == HEADER_TOP) else {
            continue;
        };
        let Some(bottom) = page
            .iter()
            .find(|f| f.x == top.x && f.text == HEADER_BOTTOM)
        else {
            continue;
        };

        for date in page.iter().filter(|f| f.x == top.x && f.y > bottom.y) {
            // The column runs past the table into footer material; the
            // first non-date cell ends it.
            let Some(md) = MonthDay::find(&date.text) else {
                break;
            };

            let entry = row(page, date.y);
            ensure!(entry.len() >= 4, "short purchase row: {:?}", date.text);

            let description = entry[2].text.clone();
            let raw = &entry[3].text;

            // A trailing minus marks a payment or credit, already covered
            // by the statement's credits total.
            if raw.ends_with('-') {
                continue;
            }

            // Purchases reduce available credit: stored negative.
            let mut value = Money::load(raw)?;
            value.cents = -value.cents;

            transactions.push(Transaction {
                date: period.date(md),
                value,
                description,
            });
        }
    }

    let sum: i64 = transactions.iter().map(|t| t.value.cents).sum();
    ensure!(
        -total.cents == sum,
        "purchases total {} does not match extracted total {}",
        total,
        Money::from_cents(-sum)
    );

    Ok(transactions)
}
