use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Amount;

/// Textual date format used for the `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense entry.
///
/// The date is kept exactly as it was entered or read from disk. Use
/// [`Expense::parsed_date`] for a calendar view of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: Amount,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Description")]
    description: String,
}

impl Expense {
    /// Build a record without validating the amount. Positivity is checked by
    /// the ledger when a new entry is added.
    pub fn new(
        date: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parse the raw date text as `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
    }

    /// Calendar month this expense falls into.
    pub fn month(&self) -> Result<YearMonth, chrono::ParseError> {
        self.parsed_date().map(YearMonth::from)
    }
}

/// A year+month bucket, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:04}-{:02}", self.year, self.month);
        f.pad(&text)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
