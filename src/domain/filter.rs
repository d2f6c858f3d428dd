use chrono::NaiveDate;

use super::{Amount, Expense};

/// A boolean condition over an expense's fields.
///
/// Implemented for plain closures, so `ledger.filter_by(|e: &Expense| ...)`
/// works, and for [`ExpenseFilter`] for conditions built from user input.
pub trait Predicate {
    fn matches(&self, expense: &Expense) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Expense) -> bool,
{
    fn matches(&self, expense: &Expense) -> bool {
        self(expense)
    }
}

/// Composable filter expression.
///
/// Date bounds are inclusive and only match records whose date parses; a
/// record with a malformed date never satisfies a date condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseFilter {
    /// Matches every record.
    All,
    /// Exact, case-sensitive category match.
    Category(String),
    OnOrAfter(NaiveDate),
    OnOrBefore(NaiveDate),
    MinAmount(Amount),
    MaxAmount(Amount),
    /// Case-insensitive substring of the description.
    DescriptionContains(String),
    And(Vec<ExpenseFilter>),
    Or(Vec<ExpenseFilter>),
    Not(Box<ExpenseFilter>),
}

impl ExpenseFilter {
    pub fn category(category: impl Into<String>) -> Self {
        ExpenseFilter::Category(category.into())
    }

    pub fn and(self, other: ExpenseFilter) -> Self {
        match self {
            ExpenseFilter::All => other,
            ExpenseFilter::And(mut parts) => {
                parts.push(other);
                ExpenseFilter::And(parts)
            }
            first => ExpenseFilter::And(vec![first, other]),
        }
    }

    pub fn or(self, other: ExpenseFilter) -> Self {
        match self {
            ExpenseFilter::Or(mut parts) => {
                parts.push(other);
                ExpenseFilter::Or(parts)
            }
            first => ExpenseFilter::Or(vec![first, other]),
        }
    }

    pub fn negate(self) -> Self {
        ExpenseFilter::Not(Box::new(self))
    }
}

impl Predicate for ExpenseFilter {
    fn matches(&self, expense: &Expense) -> bool {
        match self {
            ExpenseFilter::All => true,
            ExpenseFilter::Category(category) => expense.category() == category,
            ExpenseFilter::OnOrAfter(from) => expense.parsed_date().is_ok_and(|d| d >= *from),
            ExpenseFilter::OnOrBefore(to) => expense.parsed_date().is_ok_and(|d| d <= *to),
            ExpenseFilter::MinAmount(min) => expense.amount() >= *min,
            ExpenseFilter::MaxAmount(max) => expense.amount() <= *max,
            ExpenseFilter::DescriptionContains(needle) => expense
                .description()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            ExpenseFilter::And(parts) => parts.iter().all(|p| p.matches(expense)),
            ExpenseFilter::Or(parts) => parts.iter().any(|p| p.matches(expense)),
            ExpenseFilter::Not(inner) => !inner.matches(expense),
        }
    }
}
