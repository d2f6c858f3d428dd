use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::application::{AppError, ExpenseLedger};
use crate::config::Settings;
use crate::domain::Amount;

use super::charts::ChartKind;
use super::{print_charts, print_expenses, print_report, print_summary, today};

const MAIN_ITEMS: [&str; 6] = [
    "➕ Add Expense",
    "👁️ Show Summary",
    "📑 Filter Expenses",
    "📈 Generate Report",
    "📊 Visualize Data",
    "🗃️ Save and Exit",
];

const OTHER_CATEGORY: &str = "Other...";

/// Interactive menu over a loaded store. Changes reach the file only through
/// "Save and Exit".
pub fn run(store: &mut ExpenseLedger, settings: &Settings) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Smart Expense Tracker")
            .items(&MAIN_ITEMS)
            .default(0)
            .interact()?;

        match choice {
            0 => add_expense(store, settings, &theme)?,
            1 => print_summary(&store.summary(), settings),
            2 => filter_expenses(store, settings, &theme)?,
            3 => report_or_warn(print_report_table(store, settings)),
            4 => visualize(store, settings, &theme)?,
            _ => {
                let count = store.save()?;
                println!("💾 Saved {} expense(s) to {}", count, store.path().display());
                println!("🚫 Exiting... Goodbye!");
                return Ok(());
            }
        }
    }
}

fn add_expense(
    store: &mut ExpenseLedger,
    settings: &Settings,
    theme: &ColorfulTheme,
) -> Result<()> {
    let date: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(today())
        .interact_text()?;

    let raw_amount: String = Input::with_theme(theme)
        .with_prompt("Amount")
        .interact_text()?;
    let amount: Amount = match raw_amount.parse() {
        Ok(amount) => amount,
        Err(e) => {
            println!("😵‍💫 {}. Please try again.", e);
            return Ok(());
        }
    };

    let category = choose_category(settings, theme, true)?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    match store.add(date, amount, category, description) {
        Ok(_) => println!("✅ Expense added successfully!"),
        Err(AppError::InvalidAmount(_)) => println!("❌ Amount must be a positive number."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Pick one of the suggested categories, optionally allowing free text.
fn choose_category(
    settings: &Settings,
    theme: &ColorfulTheme,
    allow_other: bool,
) -> Result<String> {
    let mut items: Vec<&str> = settings.categories.iter().map(String::as_str).collect();
    if allow_other {
        items.push(OTHER_CATEGORY);
    }

    let index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;

    if index < settings.categories.len() {
        Ok(settings.categories[index].clone())
    } else {
        Ok(Input::with_theme(theme)
            .with_prompt("Category name")
            .interact_text()?)
    }
}

fn filter_expenses(
    store: &ExpenseLedger,
    settings: &Settings,
    theme: &ColorfulTheme,
) -> Result<()> {
    let category = choose_category(settings, theme, false)?;
    let matches = store.filter(&category);
    if matches.is_empty() {
        println!("⚠️ No expenses found for this category.");
    } else {
        println!("📋 Filtered Expenses:");
        print_expenses(matches.into_iter(), settings);
    }
    Ok(())
}

fn print_report_table(store: &ExpenseLedger, settings: &Settings) -> Result<()> {
    let report = store.report()?;
    print_report(&report, "table", settings)
}

fn visualize(store: &ExpenseLedger, settings: &Settings, theme: &ColorfulTheme) -> Result<()> {
    if store.ledger().is_empty() {
        println!("❌ No data to visualize.");
        return Ok(());
    }

    let kinds = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Histogram,
        ChartKind::All,
    ];
    let items: Vec<&str> = kinds.iter().map(|k| k.title()).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Choose a visualization")
        .items(&items)
        .default(0)
        .interact()?;

    report_or_warn(print_charts(store, kinds[index], settings));
    Ok(())
}

/// Data problems (e.g. a malformed date) are shown and the menu keeps going.
fn report_or_warn(result: Result<()>) {
    if let Err(e) = result {
        println!("❌ {:#}", e);
    }
}
