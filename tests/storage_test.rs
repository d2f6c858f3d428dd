mod common;

use std::fs;

use anyhow::Result;
use common::{amount, ledger_path, test_store, SampleExpenses};
use spendbook::application::{AppError, ExpenseLedger};
use tempfile::TempDir;

#[test]
fn test_save_then_load_round_trip() -> Result<()> {
    let (mut store, temp) = test_store()?;
    SampleExpenses::record(&mut store)?;
    store.add("2024-03-31", amount("9.99"), "Food", "Quote \"this\", then\na newline")?;

    let written = store.save()?;
    assert_eq!(written, 8);

    let reloaded = ExpenseLedger::open(ledger_path(&temp))?;
    assert_eq!(reloaded.expenses(), store.expenses());

    Ok(())
}

#[test]
fn test_saved_file_format() -> Result<()> {
    let (mut store, temp) = test_store()?;
    store.add("2024-03-15", amount("100"), "Food", "Groceries")?;
    store.add("2024-03-20", amount("50.5"), "Transport", "Taxi, late")?;
    store.save()?;

    let contents = fs::read_to_string(ledger_path(&temp))?;
    assert_eq!(
        contents,
        "Date,Amount,Category,Description\n\
         2024-03-15,100.00,Food,Groceries\n\
         2024-03-20,50.50,Transport,\"Taxi, late\"\n"
    );

    Ok(())
}

#[test]
fn test_save_overwrites_existing_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(&path, "Date,Amount,Category,Description\n2020-01-01,1.00,Old,row\n")?;

    let mut store = ExpenseLedger::open(&path)?;
    assert_eq!(store.expenses().len(), 1);
    store.add("2024-01-01", amount("2"), "New", "row")?;
    store.save()?;

    let reloaded = ExpenseLedger::open(&path)?;
    assert_eq!(reloaded.expenses().len(), 2);
    assert_eq!(reloaded.expenses()[0].category(), "Old");
    assert_eq!(reloaded.expenses()[1].category(), "New");

    Ok(())
}

#[test]
fn test_empty_ledger_saves_header_only() -> Result<()> {
    let (store, temp) = test_store()?;
    store.save()?;

    let contents = fs::read_to_string(ledger_path(&temp))?;
    assert_eq!(contents, "Date,Amount,Category,Description\n");

    let reloaded = ExpenseLedger::open(ledger_path(&temp))?;
    assert!(reloaded.ledger().is_empty());

    Ok(())
}

#[test]
fn test_add_does_not_touch_file_until_save() -> Result<()> {
    let (mut store, temp) = test_store()?;
    store.add("2024-01-01", amount("5"), "Food", "")?;

    assert!(!ledger_path(&temp).exists());

    store.save()?;
    assert!(ledger_path(&temp).exists());

    Ok(())
}

#[test]
fn test_load_keeps_stored_rows_unvalidated() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(
        &path,
        "Date,Amount,Category,Description\nsometime,-3.5,Refund,\n2024-02-01,0,Free,sample\n",
    )?;

    let store = ExpenseLedger::open(&path)?;
    assert_eq!(store.expenses().len(), 2);
    assert_eq!(store.expenses()[0].amount(), amount("-3.50"));
    assert_eq!(store.summary().total, amount("-3.50"));

    Ok(())
}

#[test]
fn test_oversized_amounts_are_storage_unavailable() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(
        &path,
        "Date,Amount,Category,Description\n\
         2024-01-01,90000000000000000,Food,x\n\
         2024-01-02,90000000000000000,Food,y\n",
    )?;

    assert!(matches!(
        ExpenseLedger::open(&path),
        Err(AppError::StorageUnavailable { .. })
    ));

    Ok(())
}

#[test]
fn test_extreme_stored_amounts_summarize() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(
        &path,
        "Date,Amount,Category,Description\n\
         2024-01-01,-100000000000,Refund,x\n\
         2024-01-02,100000000000,Food,y\n\
         2024-01-03,100000000000,Food,z\n",
    )?;

    let store = ExpenseLedger::open(&path)?;
    assert_eq!(store.summary().total, amount("100000000000"));
    assert_eq!(store.category_totals()[0].total, amount("200000000000"));
    assert_eq!(store.monthly_totals()?[0].total, amount("100000000000"));

    let bins = store.amount_histogram(10)?;
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[9].count, 2);

    Ok(())
}

#[test]
fn test_corrupt_file_is_storage_unavailable() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(&path, "Date,Amount,Category,Description\n2024-01-01,ten,Food,x\n")?;

    let result = ExpenseLedger::open(&path);
    assert!(matches!(result, Err(AppError::StorageUnavailable { .. })));

    Ok(())
}

#[test]
fn test_wrong_header_is_storage_unavailable() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ledger_path(&temp);
    fs::write(&path, "When,HowMuch,What\n2024-01-01,10,Food\n")?;

    assert!(matches!(
        ExpenseLedger::open(&path),
        Err(AppError::StorageUnavailable { .. })
    ));

    Ok(())
}

#[test]
fn test_failed_reload_keeps_current_ledger() -> Result<()> {
    let (mut store, temp) = test_store()?;
    SampleExpenses::record(&mut store)?;
    fs::write(ledger_path(&temp), "garbage without the header")?;

    assert!(store.load().is_err());
    assert_eq!(store.expenses().len(), 7);

    Ok(())
}

#[test]
fn test_directory_path_is_storage_unavailable() -> Result<()> {
    let temp = TempDir::new()?;

    let mut store = ExpenseLedger::new(temp.path());
    assert!(matches!(
        store.load(),
        Err(AppError::StorageUnavailable { .. })
    ));

    Ok(())
}

#[test]
fn test_load_replaces_in_memory_ledger() -> Result<()> {
    let (mut store, temp) = test_store()?;
    store.add("2024-01-01", amount("1"), "Food", "saved")?;
    store.save()?;
    store.add("2024-01-02", amount("2"), "Food", "unsaved")?;

    let count = store.load()?;
    assert_eq!(count, 1);
    assert_eq!(store.expenses()[0].description(), "saved");

    let other = temp.path().join("missing.csv");
    assert_eq!(store.load_from(&other)?, 0);
    assert!(store.ledger().is_empty());

    Ok(())
}

#[test]
fn test_save_to_another_path() -> Result<()> {
    let (mut store, temp) = test_store()?;
    SampleExpenses::record(&mut store)?;

    let backup = temp.path().join("backup").join("expenses-copy.csv");
    store.save_to(&backup)?;

    let copy = ExpenseLedger::open(&backup)?;
    assert_eq!(copy.expenses(), store.expenses());
    assert!(!ledger_path(&temp).exists());

    Ok(())
}
