//! Statement identity: the file-name contract and year resolution.
//!
//! Transaction rows print `MM/DD` with no year; the year comes from the
//! statement's file name, `Statement_<Mon>_<seq>_<year>.pdf`. A January
//! statement still carries trailing December activity, which belongs to the
//! previous calendar year.

use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use tally_core::{MonthDay, StatementDate};

/// Which template a statement uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    CreditCard,
    BankAccount,
}

/// The statement's nominal month and year, from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub year: i32,
    pub month: u32,
}

fn file_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Statement_([A-Za-z]{3})_(\d+)_(\d{4})\.pdf").expect("file name regex")
    })
}

fn month_number(mon: &str) -> Option<u32> {
    let month = match mon {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}

impl StatementPeriod {
    /// Parse the period from a statement file name.
    ///
    /// The name must contain `Statement_<Mon>_<seq>_<year>.pdf`; anything
    /// else is a fatal input error.
    pub fn from_file_name(name: &str) -> Result<StatementPeriod> {
        let Some(caps) = file_name_re().captures(name) else {
            bail!("not a statement file name: {name:?}");
        };

        let month = month_number(&caps[1])
            .with_context(|| format!("unknown month {:?} in {name:?}", &caps[1]))?;
        let year: i32 = caps[3].parse()?;

        Ok(StatementPeriod { year, month })
    }

    /// The calendar year a transaction month belongs to.
    ///
    /// A December transaction on a January statement is trailing activity
    /// from the previous year.
    pub fn resolve_year(&self, tx_month: u32) -> i32 {
        if self.month == 1 && tx_month == 12 {
            self.year - 1
        } else {
            self.year
        }
    }

    /// Attach the resolved year to an in-line `MM/DD` date.
    pub fn date(&self, md: MonthDay) -> StatementDate {
        StatementDate {
            year: self.resolve_year(md.month),
            month: md.month,
            day: md.day,
        }
    }
}
