//! Rendering of summaries into their tabular string form.
//!
//! This is the only place sentinel strings exist; everything upstream works
//! on `Option<f64>`. The exporter serializes these rows without modification.

use chrono::NaiveTime;
use core_types::{GroupSummary, WeekdaySummary};

/// Placeholder for metrics that are undefined for a row.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column order of a plain per-open-time summary table.
pub const SUMMARY_HEADERS: [&str; 10] = [
    "OpenTime",
    "OpenTimeCET",
    "NetPnL",
    "Trades",
    "Wins",
    "Losses",
    "WinRate",
    "CAR",
    "MaxDrawdown",
    "Calmar",
];

/// Column order of the combined weekday sweep table.
pub const WEEKDAY_HEADERS: [&str; 12] = [
    "Weekday",
    "WeekdayNum",
    "OpenTime",
    "OpenTimeCET",
    "NetPnL",
    "Trades",
    "Wins",
    "Losses",
    "WinRate",
    "CAR",
    "MaxDrawdown",
    "Calmar",
];

/// Renders one summary as a row matching `SUMMARY_HEADERS`.
pub fn summary_row(summary: &GroupSummary) -> Vec<String> {
    vec![
        fmt_time(Some(summary.open_time)),
        fmt_time(summary.open_time_cet),
        format!("{:.2}", summary.net_pnl),
        summary.trades.to_string(),
        summary.wins.to_string(),
        summary.losses.to_string(),
        fmt_percent(summary.win_rate),
        fmt_percent(summary.car),
        fmt_percent(summary.max_drawdown),
        fmt_ratio(summary.calmar),
    ]
}

/// Renders one tagged summary as a row matching `WEEKDAY_HEADERS`.
pub fn weekday_row(row: &WeekdaySummary) -> Vec<String> {
    let mut cells = vec![row.weekday.name().to_string(), row.weekday.number().to_string()];
    cells.extend(summary_row(&row.summary));
    cells
}

fn fmt_time(time: Option<NaiveTime>) -> String {
    match time {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}
