// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use spendbook::application::ExpenseLedger;
use spendbook::domain::Amount;
use tempfile::TempDir;

/// Helper to create an empty store backed by a file in a temporary directory
pub fn test_store() -> Result<(ExpenseLedger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = ExpenseLedger::open(ledger_path(&temp_dir))?;
    Ok((store, temp_dir))
}

/// Path of the ledger file inside a test directory
pub fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.csv")
}

/// Helper to parse an amount literal
pub fn amount(s: &str) -> Amount {
    s.parse().unwrap()
}

/// Test fixture: a few weeks of typical spending across three months
pub struct SampleExpenses;

impl SampleExpenses {
    pub fn record(store: &mut ExpenseLedger) -> Result<()> {
        store.add("2024-01-05", amount("45.20"), "Food", "Groceries")?;
        store.add("2024-01-09", amount("12"), "Transport", "Bus pass top-up")?;
        store.add("2024-01-21", amount("60"), "Entertainment", "Concert")?;
        store.add("2024-02-02", amount("80.75"), "Utilities", "Electricity")?;
        store.add("2024-02-14", amount("33.10"), "Food", "Dinner, downtown")?;
        store.add("2024-03-15", amount("100"), "Shopping", "Shoes")?;
        store.add("2024-03-20", amount("50"), "Food", "Market")?;
        Ok(())
    }
}
