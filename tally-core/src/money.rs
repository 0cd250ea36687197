//! Money as signed integer cents, with the statement print format codec.
//!
//! Statements print amounts like `$1,234.56`. All arithmetic on extracted
//! amounts is integer addition and negation; floats never appear.

use std::fmt;
use std::sync::OnceLock;

use anyhow::{Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A signed amount in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    pub cents: i64,
}

fn money_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$([\d,]+)\.(\d{2})$").expect("money regex"))
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: i64) -> Money {
        Money { cents }
    }

    /// Parse a statement-printed amount.
    ///
    /// The empty string is zero. Everything else must be a `$`, thousands-
    /// grouped dollars, a dot, and exactly two cent digits. No sign: the
    /// statement encodes direction by section, not by the printed amount.
    pub fn load(raw: &str) -> Result<Money> {
        if raw.is_empty() {
            return Ok(Money::ZERO);
        }

        let Some(caps) = money_re().captures(raw) else {
            bail!("invalid money: {raw:?}");
        };

        let dollars: i64 = caps[1].replace(',', "").parse()?;
        let cents: i64 = caps[2].parse()?;

        Ok(Money {
            cents: dollars * 100 + cents,
        })
    }

    /// Format in the statement print convention: zero is `"$0"`, everything
    /// else a sign prefix, grouped dollars, and two cent digits.
    pub fn save(self) -> String {
        if self.cents == 0 {
            return "$0".to_string();
        }

        let negative = self.cents < 0;
        let abs = self.cents.unsigned_abs();

        let mut dollars = (abs / 100).to_string();
        let mut i = dollars.len() as i64 - 3;
        while i > 0 {
            dollars.insert(i as usize, ',');
            i -= 3;
        }

        format!(
            "{}${}.{:02}",
            if negative { "-" } else { "" },
            dollars,
            abs % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.save())
    }
}
