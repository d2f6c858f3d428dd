use serde::Serialize;

use crate::domain::{CategoryTotal, MonthlyTotal, Summary};

/// Everything the expense summary report shows: overall totals, the
/// per-category breakdown and the month-by-month trend.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
    pub months: Vec<MonthlyTotal>,
}

impl ExpenseReport {
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}
