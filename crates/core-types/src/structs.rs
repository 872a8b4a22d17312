use crate::enums::{TradeOutcome, Weekday};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One row of a trade log, exactly as the platform exports it.
///
/// Every field is kept as a raw string; coercion into typed values is the
/// normalizer's job. CSV columns beyond these five are ignored on load.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTradeRecord {
    #[serde(rename = "OpenDate")]
    pub open_date: String,
    #[serde(rename = "OpenTime")]
    pub open_time: String,
    #[serde(rename = "ProfitLossAfterSlippage")]
    pub profit_loss_after_slippage: String,
    #[serde(rename = "CommissionFees")]
    pub commission_fees: String,
    #[serde(rename = "IsWin")]
    pub is_win: String,
}

/// The canonical typed form of a trade log row.
///
/// Field-level parse failures coerce to `None` (or `Unknown` for the
/// outcome); the row itself is always retained so row order and row count
/// survive normalization. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTrade {
    pub open_date: Option<NaiveDate>,
    /// Grouping key; the calendar date is deliberately not part of it.
    pub open_time: Option<NaiveTime>,
    /// The open time re-expressed as Prague wall-clock time.
    pub open_time_cet: Option<NaiveTime>,
    /// Lot-adjusted P&L scaled to account currency, minus commission fees.
    /// `None` when either source field failed to parse.
    pub net_pnl: Option<f64>,
    pub outcome: TradeOutcome,
}

/// The aggregate statistics of one open-time group. Immutable once computed.
///
/// All metric fields are purely numeric; sentinel rendering ("N/A",
/// percentage strings) is the formatting layer's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub open_time: NaiveTime,
    /// First non-null Prague time observed among the group's members.
    pub open_time_cet: Option<NaiveTime>,
    pub net_pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Rows whose outcome could not be determined. Counted in `trades` but
    /// in neither `wins` nor `losses`.
    pub unknown: usize,
    /// `wins / trades * 100`, rounded to 2 decimals.
    pub win_rate: Option<f64>,
    /// Compound annual return in percent. `None` when the dataset spans zero
    /// trading days or the group's loss exceeds the starting capital.
    pub car: Option<f64>,
    /// Most negative peak-to-trough decline of the group's equity curve, in
    /// percent. `None` when the group has no usable P&L values.
    pub max_drawdown: Option<f64>,
    /// CAR over |max drawdown|. `None` when the drawdown is zero or either
    /// input is unavailable.
    pub calmar: Option<f64>,
}

/// A `GroupSummary` tagged with the weekday it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySummary {
    pub weekday: Weekday,
    pub summary: GroupSummary,
}
