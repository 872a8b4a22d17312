use chrono::{NaiveDate, NaiveTime};
use core_types::{GroupSummary, NormalizedTrade, TradeOutcome};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Approximate number of trading days in a year, used to annualize returns.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Tunables of the metrics engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Base capital seeding every equity curve and CAR computation.
    pub starting_capital: f64,
    /// When set, a group's members are sorted by open date before the
    /// drawdown pass. The default (false) consumes trades in input file
    /// order, which reproduces the legacy reports exactly; the sorted mode
    /// is the chronologically correct one.
    pub sorted_drawdown: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            starting_capital: 18_000.0,
            sorted_drawdown: false,
        }
    }
}

/// Counts the distinct parseable open dates across a trade set.
///
/// This is the time base of every group's CAR: all groups of one analysis
/// share the span of the table they were computed from, not their own span.
pub fn dataset_total_days(trades: &[NormalizedTrade]) -> usize {
    trades
        .iter()
        .filter_map(|t| t.open_date)
        .collect::<BTreeSet<NaiveDate>>()
        .len()
}

/// The main entry point: groups trades by open time and computes each
/// group's aggregate statistics and risk metrics.
///
/// Output rows are ordered by open time ascending. Trades whose open time
/// failed to parse cannot be reported under a time key and are excluded.
pub fn compute_group_summaries(
    trades: &[NormalizedTrade],
    settings: &EngineSettings,
) -> Vec<GroupSummary> {
    summarize_groups(trades, settings, dataset_total_days(trades))
}

/// Like `compute_group_summaries`, but with the CAR time base supplied
/// explicitly. The cross-group coupling through `dataset_total_days` is a
/// real input of the metric, so it is a real parameter here.
pub fn summarize_groups(
    trades: &[NormalizedTrade],
    settings: &EngineSettings,
    dataset_total_days: usize,
) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<NaiveTime, Vec<&NormalizedTrade>> = BTreeMap::new();
    for trade in trades {
        if let Some(open_time) = trade.open_time {
            groups.entry(open_time).or_default().push(trade);
        }
    }
    debug!(
        groups = groups.len(),
        total_days = dataset_total_days,
        "grouped trades by open time"
    );

    groups
        .into_iter()
        .map(|(open_time, members)| {
            summarize_one(open_time, &members, settings, dataset_total_days)
        })
        .collect()
}

fn summarize_one(
    open_time: NaiveTime,
    members: &[&NormalizedTrade],
    settings: &EngineSettings,
    dataset_total_days: usize,
) -> GroupSummary {
    let trades = members.len();
    let wins = members
        .iter()
        .filter(|t| t.outcome == TradeOutcome::Win)
        .count();
    let losses = members
        .iter()
        .filter(|t| t.outcome == TradeOutcome::Loss)
        .count();
    let unknown = trades - wins - losses;

    // Rows with an unparsable net P&L contribute to neither the sum nor the
    // equity curve; the same skip rule applies to both paths.
    let pnls = pnl_series(members, settings.sorted_drawdown);
    let net_pnl: f64 = pnls.iter().sum();

    let win_rate = if trades > 0 {
        Some(round2(wins as f64 / trades as f64 * 100.0))
    } else {
        None
    };

    let car = compound_annual_return(net_pnl, settings.starting_capital, dataset_total_days);
    let drawdown = max_drawdown(&pnls, settings.starting_capital);

    GroupSummary {
        open_time,
        open_time_cet: members.iter().find_map(|t| t.open_time_cet),
        net_pnl,
        trades,
        wins,
        losses,
        unknown,
        win_rate,
        car,
        max_drawdown: drawdown,
        calmar: calmar(car, drawdown),
    }
}

/// The group's usable P&L values, in input row order or, for the sorted
/// drawdown mode, ordered by open date (undated rows first).
fn pnl_series(members: &[&NormalizedTrade], sorted: bool) -> Vec<f64> {
    if sorted {
        let mut dated: Vec<(Option<NaiveDate>, f64)> = members
            .iter()
            .filter_map(|t| t.net_pnl.map(|pnl| (t.open_date, pnl)))
            .collect();
        dated.sort_by_key(|(date, _)| *date);
        dated.into_iter().map(|(_, pnl)| pnl).collect()
    } else {
        members.iter().filter_map(|t| t.net_pnl).collect()
    }
}

/// Compound annual return in percent, rounded to 2 decimals.
///
/// `total_days` is the distinct-open-date count of the whole table the group
/// belongs to; dividing by 252 turns it into years. A dataset spanning zero
/// days has no time base, and a group whose loss wipes out the starting
/// capital has no real-valued growth rate; both yield `None`.
pub fn compound_annual_return(net_pnl: f64, starting_capital: f64, total_days: usize) -> Option<f64> {
    if total_days == 0 {
        return None;
    }
    let years = total_days as f64 / TRADING_DAYS_PER_YEAR;
    let growth = (starting_capital + net_pnl) / starting_capital;
    if growth <= 0.0 {
        return None;
    }
    Some(round2((growth.powf(1.0 / years) - 1.0) * 100.0))
}

/// Largest peak-to-trough decline of the cumulative equity curve built from
/// `pnls`, seeded at `starting_capital`. Expressed in percent (always <= 0)
/// and rounded to 2 decimals. `None` when there are no values to build a
/// curve from.
pub fn max_drawdown(pnls: &[f64], starting_capital: f64) -> Option<f64> {
    if pnls.is_empty() {
        return None;
    }
    let mut equity = starting_capital;
    let mut peak = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;
    for pnl in pnls {
        equity += pnl;
        if equity > peak {
            peak = equity;
        }
        let drawdown = (equity - peak) / peak;
        if drawdown < worst {
            worst = drawdown;
        }
    }
    Some(round2(worst * 100.0))
}

/// CAR over the absolute max drawdown, rounded to 2 decimals. `None` when
/// the drawdown is zero (the ratio is undefined) or either input is missing.
pub fn calmar(car: Option<f64>, max_drawdown: Option<f64>) -> Option<f64> {
    let (car, drawdown) = (car?, max_drawdown?.abs());
    if drawdown == 0.0 {
        return None;
    }
    Some(round2(car / drawdown))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn trade(date: Option<(i32, u32, u32)>, time: &str, pnl: Option<f64>, outcome: TradeOutcome) -> NormalizedTrade {
        NormalizedTrade {
            open_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            open_time: NaiveTime::parse_from_str(time, "%H:%M:%S").ok(),
            open_time_cet: None,
            net_pnl: pnl,
            outcome,
        }
    }

    fn opening_bell_trades() -> Vec<NormalizedTrade> {
        // 3 trades, all opened at 09:30:00 on distinct days.
        vec![
            trade(Some((2024, 3, 4)), "09:30:00", Some(99.0), TradeOutcome::Win),
            trade(Some((2024, 3, 5)), "09:30:00", Some(-51.0), TradeOutcome::Loss),
            trade(Some((2024, 3, 6)), "09:30:00", Some(199.0), TradeOutcome::Win),
        ]
    }

    #[test]
    fn aggregates_one_opening_bell_group() {
        let summaries = compute_group_summaries(&opening_bell_trades(), &EngineSettings::default());
        assert_eq!(summaries.len(), 1);

        let group = &summaries[0];
        assert_eq!(group.open_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!((group.net_pnl - 247.0).abs() < 1e-9);
        assert_eq!(group.trades, 3);
        assert_eq!(group.wins, 2);
        assert_eq!(group.losses, 1);
        assert_eq!(group.unknown, 0);
        assert_eq!(group.wins + group.losses, group.trades);
        assert_eq!(group.win_rate, Some(66.67));
    }

    #[test]
    fn risk_metrics_of_the_opening_bell_group() {
        let summaries = compute_group_summaries(&opening_bell_trades(), &EngineSettings::default());
        let group = &summaries[0];

        // Equity curve 18099, 18048, 18247; trough is -51/18099.
        assert_eq!(group.max_drawdown, Some(-0.28));

        // 3 distinct dates over 252 trading days per year.
        let years = 3.0 / TRADING_DAYS_PER_YEAR;
        let expected_car = ((18_247.0_f64 / 18_000.0).powf(1.0 / years) - 1.0) * 100.0;
        assert_eq!(group.car, Some(round2(expected_car)));

        let expected_calmar = round2(group.car.unwrap() / 0.28);
        assert_eq!(group.calmar, Some(expected_calmar));
    }

    #[test]
    fn empty_input_produces_empty_output() {
        let summaries = compute_group_summaries(&[], &EngineSettings::default());
        assert!(summaries.is_empty());
    }

    #[test]
    fn trades_without_an_open_time_are_excluded_from_grouping() {
        let mut trades = opening_bell_trades();
        trades.push(trade(Some((2024, 3, 7)), "bad", Some(1000.0), TradeOutcome::Win));

        let summaries = compute_group_summaries(&trades, &EngineSettings::default());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].trades, 3);
    }

    #[test]
    fn unknown_outcomes_count_as_neither_win_nor_loss() {
        let mut trades = opening_bell_trades();
        trades.push(trade(Some((2024, 3, 7)), "09:30:00", Some(10.0), TradeOutcome::Unknown));

        let group = &compute_group_summaries(&trades, &EngineSettings::default())[0];
        assert_eq!(group.trades, 4);
        assert_eq!(group.wins, 2);
        assert_eq!(group.losses, 1);
        assert_eq!(group.unknown, 1);
        assert_eq!(group.wins + group.losses + group.unknown, group.trades);
        assert_eq!(group.win_rate, Some(50.0));
    }

    #[test]
    fn null_pnl_rows_are_skipped_in_both_sum_and_drawdown() {
        let trades = vec![
            trade(Some((2024, 3, 4)), "09:30:00", Some(100.0), TradeOutcome::Win),
            trade(Some((2024, 3, 5)), "09:30:00", None, TradeOutcome::Loss),
            trade(Some((2024, 3, 6)), "09:30:00", Some(-40.0), TradeOutcome::Loss),
        ];
        let group = &compute_group_summaries(&trades, &EngineSettings::default())[0];
        assert!((group.net_pnl - 60.0).abs() < 1e-9);
        assert_eq!(group.trades, 3);
        // Curve is 18100, 18060: the skipped row adds no point.
        assert_eq!(group.max_drawdown, Some(round2(-40.0 / 18_100.0 * 100.0)));
    }

    #[test]
    fn groups_are_ordered_by_open_time() {
        let trades = vec![
            trade(Some((2024, 3, 4)), "15:45:00", Some(1.0), TradeOutcome::Win),
            trade(Some((2024, 3, 4)), "09:30:00", Some(1.0), TradeOutcome::Win),
            trade(Some((2024, 3, 4)), "10:00:00", Some(1.0), TradeOutcome::Win),
        ];
        let times: Vec<_> = compute_group_summaries(&trades, &EngineSettings::default())
            .iter()
            .map(|g| g.open_time.to_string())
            .collect();
        assert_eq!(times, vec!["09:30:00", "10:00:00", "15:45:00"]);
    }

    #[test]
    fn car_is_unavailable_iff_dataset_spans_zero_days() {
        assert_eq!(compound_annual_return(100.0, 18_000.0, 0), None);
        assert!(compound_annual_return(100.0, 18_000.0, 1).is_some());

        // All dates unparsable: every group's CAR is unavailable.
        let trades = vec![trade(None, "09:30:00", Some(100.0), TradeOutcome::Win)];
        let group = &compute_group_summaries(&trades, &EngineSettings::default())[0];
        assert_eq!(group.car, None);
    }

    #[test]
    fn car_is_unavailable_when_losses_wipe_out_capital() {
        assert_eq!(compound_annual_return(-18_000.0, 18_000.0, 5), None);
        assert_eq!(compound_annual_return(-20_000.0, 18_000.0, 5), None);
    }

    #[test]
    fn drawdown_is_never_positive() {
        let cases: [&[f64]; 3] = [&[50.0, 60.0, 70.0], &[-10.0, 5.0, -20.0], &[0.0]];
        for pnls in cases {
            let dd = max_drawdown(pnls, 18_000.0).unwrap();
            assert!(dd <= 0.0, "drawdown {dd} for {pnls:?}");
        }
    }

    #[test]
    fn monotonic_gains_have_zero_drawdown_and_no_calmar() {
        let dd = max_drawdown(&[10.0, 20.0, 30.0], 18_000.0);
        assert_eq!(dd, Some(0.0));
        assert_eq!(calmar(Some(5.0), dd), None);
        assert_eq!(calmar(None, Some(-1.0)), None);
        assert_eq!(calmar(Some(5.0), None), None);
    }

    #[test]
    fn legacy_drawdown_follows_input_order_sorted_mode_follows_dates() {
        // Reverse-chronological rows: the loss comes first in file order.
        let trades = vec![
            trade(Some((2024, 3, 6)), "09:30:00", Some(-100.0), TradeOutcome::Loss),
            trade(Some((2024, 3, 4)), "09:30:00", Some(300.0), TradeOutcome::Win),
        ];

        let legacy = &compute_group_summaries(&trades, &EngineSettings::default())[0];
        // Curve 17900, 18200: the first point is its own peak, drawdown 0.
        assert_eq!(legacy.max_drawdown, Some(0.0));

        let settings = EngineSettings {
            sorted_drawdown: true,
            ..EngineSettings::default()
        };
        let sorted = &compute_group_summaries(&trades, &settings)[0];
        // Curve 18300, 18200 after date sort.
        assert_eq!(sorted.max_drawdown, Some(round2(-100.0 / 18_300.0 * 100.0)));
    }

    #[test]
    fn total_days_counts_distinct_dates_only() {
        let trades = vec![
            trade(Some((2024, 3, 4)), "09:30:00", Some(1.0), TradeOutcome::Win),
            trade(Some((2024, 3, 4)), "10:00:00", Some(1.0), TradeOutcome::Win),
            trade(Some((2024, 3, 5)), "09:30:00", Some(1.0), TradeOutcome::Win),
            trade(None, "09:30:00", Some(1.0), TradeOutcome::Win),
        ];
        assert_eq!(dataset_total_days(&trades), 2);
    }
}
