//! Text renderings of the ledger charts: category bars, the monthly trend,
//! category shares and the amount histogram.

use std::fmt::Write;

use clap::ValueEnum;

use crate::domain::{Amount, AmountBin, CategoryShare, CategoryTotal, MonthlyTotal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Total expenses by category
    Bar,
    /// Monthly spending trend
    Line,
    /// Spending distribution by category
    Pie,
    /// Frequency of expense amounts
    Histogram,
    /// Every chart, one after another
    All,
}

impl ChartKind {
    pub const EACH: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Histogram,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Total Expenses by Category",
            ChartKind::Line => "Monthly Spending Trend",
            ChartKind::Pie => "Spending Distribution by Category",
            ChartKind::Histogram => "Frequency of Expense Amounts",
            ChartKind::All => "All Charts",
        }
    }
}

const BAR: char = '█';
const POINT: char = '●';

/// Length of a bar for `value` when `max` fills `width` columns.
fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn pad(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.chars().count());
    format!("{}{}", label, " ".repeat(fill))
}

fn max_amount(amounts: impl Iterator<Item = Amount>) -> f64 {
    amounts.map(Amount::as_f64).fold(0.0, f64::max)
}

pub fn bar_chart(totals: &[CategoryTotal], width: usize, symbol: &str) -> String {
    let mut out = format!("{}\n", ChartKind::Bar.title());
    let label_w = label_width(totals.iter().map(|t| t.category.as_str()));
    let max = max_amount(totals.iter().map(|t| t.total));

    for total in totals {
        let bar = BAR.to_string().repeat(scaled(total.total.as_f64(), max, width));
        let _ = writeln!(
            out,
            "{} | {} {}{}",
            pad(&total.category, label_w),
            bar,
            symbol,
            total.total
        );
    }
    out
}

pub fn line_chart(months: &[MonthlyTotal], width: usize, symbol: &str) -> String {
    let mut out = format!("{}\n", ChartKind::Line.title());
    let max = max_amount(months.iter().map(|m| m.total));

    for month in months {
        let offset = scaled(month.total.as_f64(), max, width);
        let _ = writeln!(
            out,
            "{} | {}{}{} {}{}",
            month.month,
            "·".repeat(offset.saturating_sub(1)),
            POINT,
            " ".repeat(width.saturating_sub(offset.max(1))),
            symbol,
            month.total
        );
    }
    out
}

pub fn pie_chart(shares: &[CategoryShare], width: usize) -> String {
    let mut out = format!("{}\n", ChartKind::Pie.title());
    let label_w = label_width(shares.iter().map(|s| s.category.as_str()));

    for share in shares {
        let bar = BAR.to_string().repeat(scaled(share.percentage, 100.0, width));
        let _ = writeln!(
            out,
            "{} | {:>5.1}% {}",
            pad(&share.category, label_w),
            share.percentage,
            bar
        );
    }
    out
}

pub fn histogram_chart(bins: &[AmountBin], width: usize) -> String {
    let mut out = format!("{}\n", ChartKind::Histogram.title());
    let labels: Vec<String> = bins
        .iter()
        .map(|b| format!("{} - {}", b.lower, b.upper))
        .collect();
    let label_w = label_width(labels.iter().map(String::as_str));
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    for (label, bin) in labels.iter().zip(bins) {
        let bar = BAR.to_string().repeat(scaled(bin.count as f64, max, width));
        let _ = writeln!(out, "{} | {:>4} {}", pad(label, label_w), bin.count, bar);
    }
    out
}
