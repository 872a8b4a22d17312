//! # Record Normalizer
//!
//! Coerces raw trade log rows into their canonical typed form.
//!
//! ## Architectural Principles
//!
//! - **Row-preserving:** the output sequence always has the same length and
//!   order as the input. A field that fails to parse becomes `None` (or
//!   `TradeOutcome::Unknown`); a row is never dropped and never an error.
//! - **Pure transformation:** normalization reads nothing but the row itself
//!   and produces a new immutable value.

pub mod tz;

use chrono::{NaiveDate, NaiveTime};
use core_types::{NormalizedTrade, RawTradeRecord, TradeOutcome};
use tracing::debug;

/// Conversion factor from lot-adjusted P&L units to account currency.
/// A fixed property of how the platform reports `ProfitLossAfterSlippage`,
/// not a tunable.
pub const LOT_SCALE: f64 = 100.0;

/// Normalizes a batch of raw rows, preserving row order and row count.
pub fn normalize_all(records: &[RawTradeRecord]) -> Vec<NormalizedTrade> {
    records.iter().map(normalize).collect()
}

/// Normalizes a single trade log row.
pub fn normalize(record: &RawTradeRecord) -> NormalizedTrade {
    let open_date = parse_date(&record.open_date);
    let open_time = parse_time(&record.open_time);

    let profit_loss = parse_number(&record.profit_loss_after_slippage);
    let fees = parse_number(&record.commission_fees);
    let net_pnl = match (profit_loss, fees) {
        (Some(pnl), Some(fees)) => Some(pnl * LOT_SCALE - fees),
        _ => None,
    };
    if net_pnl.is_none() {
        debug!(
            pnl = %record.profit_loss_after_slippage,
            fees = %record.commission_fees,
            "unparsable P&L fields, row retained with no net P&L"
        );
    }

    NormalizedTrade {
        open_date,
        open_time,
        open_time_cet: open_time.and_then(tz::to_prague),
        net_pnl,
        outcome: TradeOutcome::parse(&record.is_win),
    }
}

/// Parses a calendar date, accepting ISO `2024-03-08` and the US-style
/// `03/08/2024` some exports use.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

/// Strict `HH:MM:SS` time-of-day parse.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S").ok()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record(date: &str, time: &str, pnl: &str, fees: &str, is_win: &str) -> RawTradeRecord {
        RawTradeRecord {
            open_date: date.to_string(),
            open_time: time.to_string(),
            profit_loss_after_slippage: pnl.to_string(),
            commission_fees: fees.to_string(),
            is_win: is_win.to_string(),
        }
    }

    #[test]
    fn net_pnl_is_scaled_pnl_minus_fees() {
        let trade = normalize(&record("2024-03-04", "09:30:00", "1", "1", "true"));
        assert_eq!(trade.net_pnl, Some(99.0));
        assert_eq!(trade.outcome, TradeOutcome::Win);
        assert_eq!(
            trade.open_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
        assert_eq!(
            trade.open_time,
            Some(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
    }

    #[test]
    fn field_failures_coerce_instead_of_dropping_the_row() {
        let records = vec![
            record("not-a-date", "9:30", "abc", "1", "maybe"),
            record("2024-03-04", "09:30:00", "-0.5", "1", "false"),
        ];
        let trades = normalize_all(&records);
        assert_eq!(trades.len(), 2);

        assert_eq!(trades[0].open_date, None);
        assert_eq!(trades[0].open_time, None); // "9:30" is not HH:MM:SS
        assert_eq!(trades[0].net_pnl, None);
        assert_eq!(trades[0].outcome, TradeOutcome::Unknown);

        assert_eq!(trades[1].net_pnl, Some(-51.0));
        assert_eq!(trades[1].outcome, TradeOutcome::Loss);
    }

    #[test]
    fn one_bad_numeric_field_nulls_net_pnl() {
        let trade = normalize(&record("2024-03-04", "09:30:00", "2", "n/a", "true"));
        assert_eq!(trade.net_pnl, None);
    }

    #[test]
    fn us_style_dates_are_accepted() {
        let trade = normalize(&record("03/04/2024", "09:30:00", "1", "0", "true"));
        assert_eq!(
            trade.open_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
    }

    #[test]
    fn cet_annotation_follows_the_open_time() {
        let trade = normalize(&record("2024-03-04", "09:30:00", "1", "0", "true"));
        assert_eq!(
            trade.open_time_cet,
            Some(NaiveTime::from_hms_opt(15, 30, 0).unwrap())
        );

        let bad_time = normalize(&record("2024-03-04", "late", "1", "0", "true"));
        assert_eq!(bad_time.open_time_cet, None);
    }
}
