use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{AppError, ExpenseLedger, ExpenseReport};
use crate::config::Settings;
use crate::domain::{Amount, DATE_FORMAT, Expense, ExpenseFilter, Summary};
use crate::logging;

pub mod charts;
mod menu;

use charts::ChartKind;

/// Spendbook - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "Track personal expenses in a plain CSV file and see where the money goes")]
#[command(version)]
pub struct Cli {
    /// Ledger CSV file path
    #[arg(short, long, env = "SPENDBOOK_FILE", default_value = "expenses.csv")]
    pub file: PathBuf,

    /// Settings file (JSON)
    #[arg(long, env = "SPENDBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (the interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an expense and save the ledger
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "Food", "Transport")
        #[arg(short, long)]
        category: String,

        /// Description of the expense
        #[arg(short, long, default_value = "")]
        description: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show total and average spending
    Summary,

    /// List every recorded expense
    List,

    /// List expenses matching all given conditions
    Filter {
        /// Exact category (case-sensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Only expenses on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only expenses on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Minimum amount
        #[arg(long)]
        min: Option<String>,

        /// Maximum amount
        #[arg(long)]
        max: Option<String>,

        /// Text the description must contain (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Generate the expense summary report
    Report {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Draw a chart of the ledger
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
    },

    /// Interactive menu
    Menu,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init_tracing(self.verbose);

        let settings = Settings::load_or_default(self.config.as_deref())?;
        let mut store = ExpenseLedger::open(&self.file)
            .with_context(|| format!("Cannot open ledger {}", self.file.display()))?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Add {
                amount,
                category,
                description,
                date,
            } => {
                let amount: Amount = amount
                    .parse()
                    .context("Invalid amount format. Use '12.50' or '12'")?;
                let date = date.unwrap_or_else(today);

                let added = store.add(date, amount, category, description)?.clone();
                store.save()?;

                println!(
                    "Expense added: {} {}{} ({})",
                    added.date(),
                    settings.currency_symbol,
                    added.amount(),
                    added.category()
                );
            }

            Commands::Summary => {
                print_summary(&store.summary(), &settings);
            }

            Commands::List => {
                print_expenses(store.expenses().iter(), &settings);
            }

            Commands::Filter {
                category,
                from,
                to,
                min,
                max,
                search,
            } => {
                let filter = build_filter(category, from, to, min, max, search)?;
                let matches = store.filter_by(&filter);
                if matches.is_empty() {
                    println!("No expenses found.");
                } else {
                    print_expenses(matches.into_iter(), &settings);
                }
            }

            Commands::Report { format } => {
                let report = store.report()?;
                print_report(&report, &format, &settings)?;
            }

            Commands::Chart { kind } => {
                print_charts(&store, kind, &settings)?;
            }

            Commands::Menu => {
                menu::run(&mut store, &settings)?;
            }
        }

        Ok(())
    }
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn build_filter(
    category: Option<String>,
    from: Option<String>,
    to: Option<String>,
    min: Option<String>,
    max: Option<String>,
    search: Option<String>,
) -> Result<ExpenseFilter> {
    let mut filter = ExpenseFilter::All;

    if let Some(category) = category {
        filter = filter.and(ExpenseFilter::Category(category));
    }
    if let Some(from) = from {
        filter = filter.and(ExpenseFilter::OnOrAfter(
            parse_date(&from).context("Invalid --from date")?,
        ));
    }
    if let Some(to) = to {
        filter = filter.and(ExpenseFilter::OnOrBefore(
            parse_date(&to).context("Invalid --to date")?,
        ));
    }
    if let Some(min) = min {
        let min: Amount = min.parse().context("Invalid --min amount")?;
        filter = filter.and(ExpenseFilter::MinAmount(min));
    }
    if let Some(max) = max {
        let max: Amount = max.parse().context("Invalid --max amount")?;
        filter = filter.and(ExpenseFilter::MaxAmount(max));
    }
    if let Some(search) = search {
        filter = filter.and(ExpenseFilter::DescriptionContains(search));
    }

    Ok(filter)
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).context("Date must be in YYYY-MM-DD format")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub(crate) fn print_summary(summary: &Summary, settings: &Settings) {
    let symbol = &settings.currency_symbol;
    println!("Total Spending:   {}{}", symbol, summary.total);
    match summary.average() {
        Ok(average) => println!("Average Spending: {}{}", symbol, average),
        Err(_) => println!("Average Spending: n/a (no expenses recorded)"),
    }
}

pub(crate) fn print_expenses<'a>(
    expenses: impl Iterator<Item = &'a Expense>,
    settings: &Settings,
) {
    let mut expenses = expenses.peekable();
    if expenses.peek().is_none() {
        println!("No expenses recorded.");
        return;
    }

    println!(
        "{:<12} {:>12} {:<18} DESCRIPTION",
        "DATE", "AMOUNT", "CATEGORY"
    );
    println!("{}", "-".repeat(70));
    for expense in expenses {
        println!(
            "{:<12} {:>12} {:<18} {}",
            truncate(expense.date(), 12),
            format!("{}{}", settings.currency_symbol, expense.amount()),
            truncate(expense.category(), 18),
            truncate(expense.description(), 30)
        );
    }
}

pub(crate) fn print_report(
    report: &ExpenseReport,
    format: &str,
    settings: &Settings,
) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        "csv" => write_report_csv(io::stdout().lock(), report)?,
        _ => {
            let symbol = &settings.currency_symbol;
            println!("Expense Summary Report");
            println!();
            print_summary(&report.summary, settings);

            println!();
            println!("Category-wise Total Spending:");
            println!("{:<20} {:>14}", "CATEGORY", "TOTAL");
            println!("{}", "-".repeat(35));
            for category in &report.categories {
                println!(
                    "{:<20} {:>14}",
                    truncate(&category.category, 20),
                    format!("{}{}", symbol, category.total)
                );
            }

            println!();
            println!("Monthly Spending Summary:");
            println!("{:<20} {:>14}", "MONTH", "TOTAL");
            println!("{}", "-".repeat(35));
            for month in &report.months {
                println!(
                    "{:<20} {:>14}",
                    month.month.to_string(),
                    format!("{}{}", symbol, month.total)
                );
            }
        }
    }
    Ok(())
}

/// Flatten a report into `kind,key,amount` rows.
fn write_report_csv<W: io::Write>(writer: W, report: &ExpenseReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["kind", "key", "amount"])?;

    wtr.write_record(["total", "", report.summary.total.to_string().as_str()])?;
    if let Some(average) = report.summary.average {
        wtr.write_record(["average", "", average.to_string().as_str()])?;
    }
    for category in &report.categories {
        let total = category.total.to_string();
        wtr.write_record(["category", category.category.as_str(), total.as_str()])?;
    }
    for month in &report.months {
        let (key, total) = (month.month.to_string(), month.total.to_string());
        wtr.write_record(["month", key.as_str(), total.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn print_charts(
    store: &ExpenseLedger,
    kind: ChartKind,
    settings: &Settings,
) -> Result<()> {
    if store.ledger().is_empty() {
        println!("No data to visualize.");
        return Ok(());
    }

    print!("{}", render_chart(store, kind, settings)?);
    Ok(())
}

fn render_chart(
    store: &ExpenseLedger,
    kind: ChartKind,
    settings: &Settings,
) -> Result<String, AppError> {
    let width = settings.chart_width;
    let symbol = settings.currency_symbol.as_str();
    Ok(match kind {
        ChartKind::Bar => charts::bar_chart(&store.category_totals(), width, symbol),
        ChartKind::Line => charts::line_chart(&store.monthly_totals()?, width, symbol),
        ChartKind::Pie => charts::pie_chart(&store.category_shares(), width),
        ChartKind::Histogram => {
            charts::histogram_chart(&store.amount_histogram(settings.histogram_bins)?, width)
        }
        ChartKind::All => ChartKind::EACH
            .iter()
            .map(|k| render_chart(store, *k, settings))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    })
}
