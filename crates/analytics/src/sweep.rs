use crate::engine::{EngineSettings, compute_group_summaries};
use chrono::Datelike;
use core_types::{GroupSummary, NormalizedTrade, Weekday, WeekdaySummary};
use tracing::debug;

/// Runs the open-time analysis over the subset of trades opened on one
/// weekday. Trades whose open date failed to parse match no weekday. The
/// CAR time base is the subset's own distinct-date count, so a "Mondays
/// only" report annualizes over the Mondays it actually saw.
///
/// A weekday with no matching trades yields an empty table, not an error.
pub fn summarize_weekday(
    trades: &[NormalizedTrade],
    weekday: Weekday,
    settings: &EngineSettings,
) -> Vec<GroupSummary> {
    let subset: Vec<NormalizedTrade> = trades
        .iter()
        .filter(|t| {
            t.open_date
                .map(|d| Weekday::from_chrono(d.weekday()) == weekday)
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    debug!(weekday = %weekday, trades = subset.len(), "filtered trades for weekday analysis");
    compute_group_summaries(&subset, settings)
}

/// Repeats the open-time analysis for every weekday and concatenates the
/// results, each row tagged with its weekday. Weekdays that produce no
/// groups are skipped. Rows are ordered by weekday number ascending, then
/// open time ascending within the weekday.
pub fn sweep_all_weekdays(
    trades: &[NormalizedTrade],
    settings: &EngineSettings,
) -> Vec<WeekdaySummary> {
    let mut combined = Vec::new();
    for weekday in Weekday::ALL {
        for summary in summarize_weekday(trades, weekday, settings) {
            combined.push(WeekdaySummary { weekday, summary });
        }
    }
    combined
}
