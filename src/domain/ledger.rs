use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{Amount, Cents, Expense, Predicate, YearMonth};

/// Ordered, append-only collection of expenses.
///
/// Insertion order is preserved; every derived view below is computed on
/// demand from the records and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

/// Grand total, record count and mean amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: Amount,
    pub count: usize,
    /// `None` when the ledger holds no records.
    pub average: Option<Amount>,
}

impl Summary {
    /// The mean amount, or `EmptyLedger` when there is nothing to average.
    pub fn average(&self) -> Result<Amount, LedgerError> {
        self.average.ok_or(LedgerError::EmptyLedger)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    pub percentage: f64,
}

/// One histogram interval. `upper` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmountBin {
    pub lower: Amount,
    pub upper: Amount,
    pub count: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records read from storage. Amounts are taken as they are.
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// Append a new expense. Rejects non-positive amounts and leaves the ledger
    /// untouched in that case.
    pub fn add(&mut self, expense: Expense) -> Result<&Expense, LedgerError> {
        if !expense.amount().is_positive() {
            return Err(LedgerError::InvalidAmount(expense.amount()));
        }
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn total(&self) -> Amount {
        self.expenses.iter().map(Expense::amount).sum()
    }

    pub fn summary(&self) -> Summary {
        let total = self.total();
        let count = self.expenses.len();
        let average = (count > 0).then(|| {
            let divisor = Cents::try_from(count).unwrap_or(Cents::MAX);
            Amount::from_cents(rounded_div(total.cents(), divisor))
        });
        Summary {
            total,
            count,
            average,
        }
    }

    /// Records satisfying `predicate`, in ledger order.
    pub fn filter_by<P>(&self, predicate: &P) -> Vec<&Expense>
    where
        P: Predicate + ?Sized,
    {
        self.expenses
            .iter()
            .filter(|expense| predicate.matches(expense))
            .collect()
    }

    /// Records whose category equals `category` exactly.
    pub fn filter_category(&self, category: &str) -> Vec<&Expense> {
        self.filter_by(&|expense: &Expense| expense.category() == category)
    }

    /// Per-category sums, sorted by category text.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category()).or_default() += expense.amount();
        }

        totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total,
            })
            .collect()
    }

    /// Per-month sums in chronological order.
    ///
    /// Every date must parse; the first malformed one fails the whole call.
    pub fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>, LedgerError> {
        let mut totals: BTreeMap<YearMonth, Amount> = BTreeMap::new();
        for (index, expense) in self.expenses.iter().enumerate() {
            let month = expense
                .month()
                .map_err(|_| LedgerError::MalformedDate {
                    index,
                    value: expense.date().to_string(),
                })?;
            *totals.entry(month).or_default() += expense.amount();
        }

        Ok(totals
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect())
    }

    /// Category totals with their share of the grand total, in percent.
    pub fn category_shares(&self) -> Vec<CategoryShare> {
        let grand_total = self.total().cents();
        self.category_totals()
            .into_iter()
            .map(|CategoryTotal { category, total }| {
                let percentage = if grand_total == 0 {
                    0.0
                } else {
                    total.cents() as f64 / grand_total as f64 * 100.0
                };
                CategoryShare {
                    category,
                    total,
                    percentage,
                }
            })
            .collect()
    }

    /// Frequency of amounts over `bins` equal-width intervals spanning the
    /// smallest to the largest amount.
    pub fn amount_histogram(&self, bins: usize) -> Result<Vec<AmountBin>, LedgerError> {
        if bins == 0 {
            return Err(LedgerError::InvalidBinCount);
        }
        let (Some(min), Some(max)) = (
            self.expenses.iter().map(Expense::amount).min(),
            self.expenses.iter().map(Expense::amount).max(),
        ) else {
            return Ok(Vec::new());
        };

        if min == max {
            return Ok(vec![AmountBin {
                lower: min,
                upper: max,
                count: self.expenses.len(),
            }]);
        }

        let low = i128::from(min.cents());
        let span = i128::from(max.cents()) - low;
        let bin_count = bins as i128;
        // Every edge lies between min and max, so it fits back into cents.
        let edge = |i: i128| Amount::from_cents((low + span * i / bin_count) as Cents);

        let mut histogram: Vec<AmountBin> = (0..bin_count)
            .map(|i| AmountBin {
                lower: edge(i),
                upper: edge(i + 1),
                count: 0,
            })
            .collect();

        for expense in &self.expenses {
            let offset = i128::from(expense.amount().cents()) - low;
            let slot = ((offset * bin_count) / span).min(bin_count - 1) as usize;
            histogram[slot].count += 1;
        }

        Ok(histogram)
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
fn rounded_div(dividend: Cents, divisor: Cents) -> Cents {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + dividend.signum()
    } else {
        quotient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    InvalidAmount(Amount),
    MalformedDate { index: usize, value: String },
    EmptyLedger,
    InvalidBinCount,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount)
            }
            LedgerError::MalformedDate { index, value } => write!(
                f,
                "Record {} has date '{}', expected YYYY-MM-DD",
                index + 1,
                value
            ),
            LedgerError::EmptyLedger => write!(f, "No expenses recorded"),
            LedgerError::InvalidBinCount => write!(f, "Histogram needs at least one bin"),
        }
    }
}

impl std::error::Error for LedgerError {}
