//! Statement date types.
//!
//! Transaction rows print only `MM/DD`; the year lives in the statement's
//! file name. `MonthDay` is the in-line form, `StatementDate` the resolved
//! `MM/DD/YYYY` form.

use std::fmt;
use std::sync::OnceLock;

use anyhow::{Result, bail, ensure};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A statement-local date: month and day with no year attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d\d)/(\d\d)").expect("month/day regex"))
}

impl MonthDay {
    /// Find the first `MM/DD` token in a text run, if any.
    pub fn find(text: &str) -> Option<MonthDay> {
        let caps = month_day_re().captures(text)?;
        Some(MonthDay {
            month: caps[1].parse().ok()?,
            day: caps[2].parse().ok()?,
        })
    }
}

/// A fully-resolved calendar date, printed as `MM/DD/YYYY`.
///
/// Field order gives the derived `Ord` the (year, month, day) lexicographic
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl StatementDate {
    /// Parse `MM/DD/YYYY`, validating month and day ranges.
    pub fn load(raw: &str) -> Result<StatementDate> {
        let parts: Vec<&str> = raw.split('/').collect();
        let [month, day, year] = parts[..] else {
            bail!("invalid date: {raw:?}");
        };

        let date = StatementDate {
            year: year.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        };

        ensure!(
            (1..=12).contains(&date.month) && (1..=31).contains(&date.day),
            "invalid date: {raw:?}"
        );

        Ok(date)
    }

    /// Format as `MM/DD/YYYY`, zero-padding month and day.
    pub fn save(self) -> String {
        format!("{:02}/{:02}/{}", self.month, self.day, self.year)
    }

    /// Convert to a `chrono` date. `None` for impossible dates the range
    /// checks cannot catch (e.g. 02/30).
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.save())
    }
}
