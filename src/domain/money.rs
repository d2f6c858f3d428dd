use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Money is represented as integer cents to avoid floating-point drift in totals.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// A monetary amount as recorded in the ledger.
///
/// Stored as cents; rendered and persisted as a decimal with two fractional
/// digits ("12.50"). The sign is preserved so that rows already on disk load
/// as-is; positivity is only checked when a new expense is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Cents);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: Cents) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> Cents {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Amount as a float, for chart scaling only.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format_cents(self.0);
        f.pad(&text)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cents(s).map(Amount)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Format cents as a decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Largest magnitude accepted from text: 100 billion units. Sums over any
/// realistic ledger stay well inside `i64`.
pub const MAX_CENTS: Cents = 10_000_000_000_000;

/// Parse a decimal string into cents.
///
/// Accepts "50", "50.5", "50.00", ".5", a leading sign and an exponent
/// ("1.5e2", as written by float-based tools). Trailing zeros past the
/// second fractional place are fine; any other sub-cent digit is rejected
/// with [`ParseAmountError::TooPrecise`].
pub fn parse_cents(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent
                .parse()
                .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;
            (mantissa, Some(exponent))
        }
        None => (unsigned, None),
    };

    let (units_str, fraction_str) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if units_str.is_empty() && fraction_str.is_empty() {
        return Err(match exponent {
            Some(_) => ParseAmountError::InvalidFormat(input.to_string()),
            None => ParseAmountError::Empty,
        });
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !fraction_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }

    // Digits of the whole number; everything before `cut` lands in whole cents.
    let digits: Vec<i64> = units_str
        .bytes()
        .chain(fraction_str.bytes())
        .map(|b| i64::from(b - b'0'))
        .collect();
    let cut = units_str.len() as i64 + i64::from(exponent.unwrap_or(0)) + 2;
    let split = cut.clamp(0, digits.len() as i64) as usize;
    let (kept, dropped) = digits.split_at(split);

    if dropped.iter().any(|&d| d != 0) {
        return Err(ParseAmountError::TooPrecise(input.to_string()));
    }

    let out_of_range = || ParseAmountError::OutOfRange(input.to_string());
    let mut cents: Cents = 0;
    for &digit in kept {
        cents = cents
            .checked_mul(10)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(out_of_range)?;
    }
    if cents != 0 {
        for _ in digits.len() as i64..cut {
            cents = cents.checked_mul(10).ok_or_else(out_of_range)?;
        }
    }
    if cents > MAX_CENTS {
        return Err(out_of_range());
    }

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    /// A non-zero digit below one cent.
    TooPrecise(String),
    OutOfRange(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat(raw) => write!(f, "invalid amount '{}'", raw),
            ParseAmountError::TooPrecise(raw) => {
                write!(f, "amount '{}' has more than two decimal places", raw)
            }
            ParseAmountError::OutOfRange(raw) => write!(f, "amount '{}' is out of range", raw),
        }
    }
}

impl std::error::Error for ParseAmountError {}
