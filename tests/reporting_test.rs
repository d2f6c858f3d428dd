mod common;

use anyhow::Result;
use common::{amount, test_store, SampleExpenses};
use spendbook::application::AppError;
use spendbook::domain::{Amount, YearMonth};

#[test]
fn test_category_totals() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    SampleExpenses::record(&mut store)?;

    let totals = store.category_totals();
    let rows: Vec<(&str, Amount)> = totals
        .iter()
        .map(|t| (t.category.as_str(), t.total))
        .collect();

    // Sorted by category text
    assert_eq!(
        rows,
        vec![
            ("Entertainment", amount("60")),
            ("Food", amount("128.30")),
            ("Shopping", amount("100")),
            ("Transport", amount("12")),
            ("Utilities", amount("80.75")),
        ]
    );

    Ok(())
}

#[test]
fn test_category_totals_partition_grand_total() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    SampleExpenses::record(&mut store)?;

    let sum: Amount = store.category_totals().iter().map(|t| t.total).sum();
    assert_eq!(sum, store.summary().total);

    Ok(())
}

#[test]
fn test_category_totals_only_observed_categories() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-01-01", amount("3"), "Food", "")?;

    let totals = store.category_totals();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].category, "Food");

    Ok(())
}

#[test]
fn test_monthly_totals_single_bucket() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-03-15", amount("100"), "Food", "")?;
    store.add("2024-03-20", amount("50"), "Transport", "")?;

    let monthly = store.monthly_totals()?;
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month.to_string(), "2024-03");
    assert_eq!(monthly[0].total, amount("150"));

    Ok(())
}

#[test]
fn test_monthly_totals_chronological() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-02-10", amount("5"), "Food", "")?;
    store.add("2023-11-30", amount("7"), "Food", "")?;
    store.add("2024-01-01", amount("9"), "Food", "")?;
    store.add("2024-02-28", amount("1"), "Food", "")?;

    let months: Vec<(YearMonth, Amount)> = store
        .monthly_totals()?
        .into_iter()
        .map(|m| (m.month, m.total))
        .collect();

    assert_eq!(
        months,
        vec![
            (YearMonth::new(2023, 11), amount("7")),
            (YearMonth::new(2024, 1), amount("9")),
            (YearMonth::new(2024, 2), amount("6")),
        ]
    );

    Ok(())
}

#[test]
fn test_monthly_totals_malformed_date() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-03-15", amount("100"), "Food", "")?;
    store.add("15/03/2024", amount("50"), "Food", "")?;

    match store.monthly_totals() {
        Err(AppError::MalformedDate { record, value }) => {
            assert_eq!(record, 2);
            assert_eq!(value, "15/03/2024");
        }
        other => panic!("expected MalformedDate, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_report_combines_views() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    SampleExpenses::record(&mut store)?;

    let report = store.report()?;
    assert!(!report.is_empty());
    assert_eq!(report.summary.total, amount("381.05"));
    assert_eq!(report.categories.len(), 5);

    let months: Vec<String> = report.months.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(report.months[0].total, amount("117.20"));
    assert_eq!(report.months[1].total, amount("113.85"));
    assert_eq!(report.months[2].total, amount("150"));

    Ok(())
}

#[test]
fn test_report_json_shape() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-03-15", amount("100"), "Food", "")?;
    store.add("2024-03-20", amount("50"), "Transport", "")?;

    let json = serde_json::to_value(store.report()?)?;
    assert_eq!(json["summary"]["total"], "150.00");
    assert_eq!(json["summary"]["average"], "75.00");
    assert_eq!(json["categories"][0]["category"], "Food");
    assert_eq!(json["months"][0]["month"], "2024-03");

    Ok(())
}

#[test]
fn test_report_on_empty_ledger() -> Result<()> {
    let (store, _temp) = test_store()?;

    let report = store.report()?;
    assert!(report.is_empty());
    assert!(report.categories.is_empty());
    assert!(report.months.is_empty());

    let json = serde_json::to_value(&report)?;
    assert!(json["summary"]["average"].is_null());

    Ok(())
}

#[test]
fn test_category_shares() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    store.add("2024-01-01", amount("30"), "Food", "")?;
    store.add("2024-01-02", amount("10"), "Transport", "")?;

    let shares = store.category_shares();
    assert_eq!(shares[0].category, "Food");
    assert!((shares[0].percentage - 75.0).abs() < 1e-9);
    assert!((shares[1].percentage - 25.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_amount_histogram() -> Result<()> {
    let (mut store, _temp) = test_store()?;
    SampleExpenses::record(&mut store)?;

    let bins = store.amount_histogram(10)?;
    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].lower, amount("12"));
    assert_eq!(bins[9].upper, amount("100"));
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 7);

    assert!(matches!(
        store.amount_histogram(0),
        Err(AppError::InvalidBinCount)
    ));

    Ok(())
}
