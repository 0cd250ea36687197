//! PNC checking statement parser (positioned text).
//!
//! The statement is a stack of labeled sections under an "Activity Detail"
//! anchor:
//!
//!   Activity Detail
//!   Deposits and Other Additions
//!   Date   Amount   Description
//!   03/14  50.00    Mobile deposit
//!   ...
//!   Checks and Substitute Checks
//!   Check number   Amount   Date
//!   1041           15.00    03/18
//!   ...
//!   Daily Balance Detail
//!
//! Section labels, first data cells, and the continuation markers all share
//! the anchor's x coordinate, so the scan walks that column and rebuilds
//! each data row from its baseline. A "Balance Summary" section elsewhere
//! prints the deposit and deduction totals the extracted sum must match.

use anyhow::{Context, Result, bail, ensure};

use tally_core::{Money, MonthDay, Transaction};

use crate::statement::StatementPeriod;
use crate::text::{Fragment, Page, column, row};

/// How rows in a section are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extractor {
    /// `[MM/DD, amount, description...]` with the section's sign.
    Default { sign: i64 },
    /// `[check number, amount, MM/DD]`, always a deduction.
    Check,
}

struct SectionSpec {
    label: &'static str,
    extractor: Extractor,
    /// Column-header tokens that must follow the label, consumed last-first.
    expect: &'static [&'static str],
}

/// Recognized section labels. Adding a bank template variant is a data
/// change here, not new branching.
const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        label: "Deposits and Other Additions",
        extractor: Extractor::Default { sign: 1 },
        expect: &["Date"],
    },
    SectionSpec {
        label: "Banking/Check Card Withdrawals and Purchases",
        extractor: Extractor::Default { sign: -1 },
        expect: &["Date"],
    },
    SectionSpec {
        label: "Banking/Debit Card Withdrawals and Purchases",
        extractor: Extractor::Default { sign: -1 },
        expect: &["Date"],
    },
    SectionSpec {
        label: "Online and Electronic Banking Deductions",
        extractor: Extractor::Default { sign: -1 },
        expect: &["Date"],
    },
    SectionSpec {
        label: "Other Deductions",
        extractor: Extractor::Default { sign: -1 },
        expect: &["Date"],
    },
    SectionSpec {
        label: "Checks and Substitute Checks",
        extractor: Extractor::Check,
        expect: &["number", "Check"],
    },
];

const ANCHOR: &str = "Activity Detail";
const REANCHOR: &str = "Account Number:";
const TERMINATOR: &str = "Daily Balance Detail";
const CONTINUATION: &str = "continued on next page";

const SUMMARY_LABEL: &str = "Balance Summary";
/// Fragment offsets of the deposit and deduction totals past the
/// "Balance Summary" label, in decode order. These are constants of the
/// current PNC checking layout; a repaginated template needs its own pair.
const SUMMARY_POSITIVE_OFFSET: usize = 10;
const SUMMARY_NEGATIVE_OFFSET: usize = 11;

/// Maximum assembled description length. Longer means a mis-segmented row
/// absorbed unrelated text.
const MAX_DESCRIPTION_LEN: usize = 60;

/// Extract every transaction from a checking statement and reconcile the
/// sum against the printed Balance Summary totals.
pub fn parse_debit_statement(
    pages: &[Page],
    period: &StatementPeriod,
) -> Result<Vec<Transaction>> {
    let mut active: Option<Extractor> = None;
    let mut expected: Vec<&'static str> = Vec::new();
    let mut started = false;
    let mut transactions = Vec::new();

    for page in pages {
        let start = page
            .iter()
            .find(|f| f.text == ANCHOR)
            .or_else(|| started.then(|| page.iter().find(|f| f.text == REANCHOR)).flatten());
        let Some(start) = start else { continue };
        started = true;

        let entries: Vec<&Fragment> = column(page, start.x)
            .into_iter()
            .filter(|f| f.y > start.y)
            .collect();

        for (i, node) in entries.iter().enumerate() {
            if let Some(want) = expected.pop() {
                ensure!(
                    node.text == want,
                    "column header mismatch: expected {:?}, found {:?}",
                    want,
                    node.text
                );
            } else if node.text == TERMINATOR || node.text.contains(CONTINUATION) {
                break;
            } else if let Some(section) = SECTIONS.iter().find(|s| s.label == node.text) {
                active = Some(section.extractor);
                expected.extend_from_slice(section.expect);
            } else {
                let Some(extractor) = active else {
                    bail!("data row {:?} before any section label", node.text);
                };

                let mut entry = row(page, node.y);

                // Wrapped description lines share the trailing column and
                // sit between this entry and the next one.
                let last_x = entry[entry.len() - 1].x;
                let next_y = entries.get(i + 1).map(|next| next.y);
                let wrap = column(page, last_x)
                    .into_iter()
                    .filter(|f| f.y > node.y && next_y.is_none_or(|limit| f.y < limit));
                entry.extend(wrap);

                transactions.push(extract(extractor, &entry, period)?);
            }
        }
    }

    reconcile(pages, &transactions)?;
    Ok(transactions)
}

fn extract(extractor: Extractor, entry: &[&Fragment], period: &StatementPeriod) -> Result<Transaction> {
    match extractor {
        Extractor::Default { sign } => extract_default(entry, sign, period),
        Extractor::Check => extract_check(entry, period),
    }
}

fn cell_texts<'a>(entry: &[&'a Fragment]) -> Vec<&'a str> {
    entry.iter().map(|f| f.text.as_str()).collect()
}

fn extract_default(
    entry: &[&Fragment],
    sign: i64,
    period: &StatementPeriod,
) -> Result<Transaction> {
    ensure!(entry.len() >= 2, "short row: {:?}", cell_texts(entry));

    let md = MonthDay::find(&entry[0].text)
        .with_context(|| format!("no MM/DD date in row cell {:?}", entry[0].text))?;

    // Amounts print without the dollar sign; "$0" restores the format the
    // money codec expects without changing the value.
    let mut value = Money::load(&format!("$0{}", entry[1].text))?;
    value.cents *= sign;

    let description = entry[2..]
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    ensure!(
        description.len() <= MAX_DESCRIPTION_LEN,
        "description too long ({} chars): {description:?}",
        description.len()
    );

    Ok(Transaction {
        date: period.date(md),
        value,
        description,
    })
}

fn extract_check(entry: &[&Fragment], period: &StatementPeriod) -> Result<Transaction> {
    ensure!(entry.len() >= 3, "short check row: {:?}", cell_texts(entry));

    let number = &entry[0].text;
    ensure!(
        number.len() == 4 && number.bytes().all(|b| b.is_ascii_digit()),
        "not a check number: {number:?}"
    );

    let md = MonthDay::find(&entry[2].text)
        .with_context(|| format!("no MM/DD date in check cell {:?}", entry[2].text))?;

    let mut value = Money::load(&format!("$0{}", entry[1].text))?;
    value.cents = -value.cents;

    Ok(Transaction {
        date: period.date(md),
        value,
        description: format!("Check #{number}"),
    })
}

fn reconcile(pages: &[Page], transactions: &[Transaction]) -> Result<()> {
    let (page, label) = pages
        .iter()
        .find_map(|p| {
            p.iter()
                .position(|f| f.text == SUMMARY_LABEL)
                .map(|i| (p, i))
        })
        .context("no Balance Summary section")?;

    let total_at = |offset: usize| -> Result<Money> {
        let fragment = page
            .get(label + offset)
            .with_context(|| format!("no Balance Summary total at offset {offset}"))?;
        Money::load(&format!("$0{}", fragment.text))
    };

    let positive = total_at(SUMMARY_POSITIVE_OFFSET)?;
    let negative = total_at(SUMMARY_NEGATIVE_OFFSET)?;
    let printed = positive.cents - negative.cents;

    let sum: i64 = transactions.iter().map(|t| t.value.cents).sum();
    ensure!(
        sum == printed,
        "statement total {} does not match extracted total {}",
        Money::from_cents(printed),
        Money::from_cents(sum)
    );

    Ok(())
}
