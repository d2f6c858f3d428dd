use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{
    Amount, AmountBin, CategoryShare, CategoryTotal, Expense, Ledger, MonthlyTotal, Predicate,
    Summary,
};
use crate::storage;

use super::{AppError, ExpenseReport};

/// The expense store: owns the in-memory ledger for one run and the path of
/// the CSV file it is synchronized with.
///
/// The in-memory ledger is authoritative. The file is only read by
/// [`ExpenseLedger::load`] and only written by [`ExpenseLedger::save`].
pub struct ExpenseLedger {
    path: PathBuf,
    ledger: Ledger,
}

impl ExpenseLedger {
    /// Create an empty store bound to `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ledger: Ledger::new(),
        }
    }

    /// Create a store bound to `path` and load it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn expenses(&self) -> &[Expense] {
        self.ledger.expenses()
    }

    // ========================
    // Persistence
    // ========================

    /// Reload the ledger from the bound file. Returns the number of records.
    pub fn load(&mut self) -> Result<usize, AppError> {
        let path = self.path.clone();
        self.load_from(&path)
    }

    /// Replace the in-memory ledger with the contents of `path`.
    ///
    /// A missing file yields an empty ledger. An unreadable or malformed file
    /// is reported as `StorageUnavailable` and the current ledger is kept.
    pub fn load_from(&mut self, path: &Path) -> Result<usize, AppError> {
        let expenses = storage::read_ledger_file(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "ledger file unreadable");
            AppError::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.ledger = match expenses {
            Some(expenses) => Ledger::from_expenses(expenses),
            None => {
                info!(path = %path.display(), "no ledger file yet, starting empty");
                Ledger::new()
            }
        };

        debug!(path = %path.display(), records = self.ledger.len(), "ledger loaded");
        Ok(self.ledger.len())
    }

    /// Write the ledger to the bound file. Returns the number of records.
    pub fn save(&self) -> Result<usize, AppError> {
        self.save_to(&self.path)
    }

    /// Write the whole ledger to `path`, replacing whatever is there.
    pub fn save_to(&self, path: &Path) -> Result<usize, AppError> {
        let written = storage::write_ledger_file(path, self.ledger.expenses()).map_err(
            |source| AppError::StorageWrite {
                path: path.to_path_buf(),
                source,
            },
        )?;

        debug!(path = %path.display(), records = written, "ledger saved");
        Ok(written)
    }

    // ========================
    // Recording
    // ========================

    /// Append a new expense. The amount must be positive; date, category and
    /// description are taken as given.
    pub fn add(
        &mut self,
        date: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&Expense, AppError> {
        let expense = Expense::new(date, amount, category, description);
        match self.ledger.add(expense) {
            Ok(added) => {
                debug!(
                    date = added.date(),
                    amount = %added.amount(),
                    category = added.category(),
                    "expense added"
                );
                Ok(added)
            }
            Err(err) => {
                warn!(amount = %amount, "rejected expense with non-positive amount");
                Err(err.into())
            }
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }

    /// Records whose category equals `category` exactly, in ledger order.
    pub fn filter(&self, category: &str) -> Vec<&Expense> {
        self.ledger.filter_category(category)
    }

    /// Records matching an arbitrary predicate, in ledger order.
    pub fn filter_by<P>(&self, predicate: &P) -> Vec<&Expense>
    where
        P: Predicate + ?Sized,
    {
        self.ledger.filter_by(predicate)
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        self.ledger.category_totals()
    }

    pub fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>, AppError> {
        self.ledger.monthly_totals().map_err(|err| {
            warn!(error = %err, "monthly bucketing failed");
            AppError::from(err)
        })
    }

    pub fn category_shares(&self) -> Vec<CategoryShare> {
        self.ledger.category_shares()
    }

    pub fn amount_histogram(&self, bins: usize) -> Result<Vec<AmountBin>, AppError> {
        Ok(self.ledger.amount_histogram(bins)?)
    }

    /// Summary, category breakdown and monthly trend in one report.
    pub fn report(&self) -> Result<ExpenseReport, AppError> {
        Ok(ExpenseReport {
            summary: self.summary(),
            categories: self.category_totals(),
            months: self.monthly_totals()?,
        })
    }
}
