use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Europe::Prague;

/// Anchor date used to resolve daylight-saving offsets. Pinned so the
/// conversion is a pure function of the time of day; on this date both zones
/// are on standard time (EST -> CET, a +6 hour shift).
const ANCHOR: (i32, u32, u32) = (2000, 1, 1);

/// Reinterprets a time of day as US Eastern wall-clock time on the anchor
/// date and returns the equivalent Prague wall-clock time.
///
/// Returns `None` if the local time is ambiguous or nonexistent in the source
/// zone; never errors. Times that cross midnight wrap (the date component is
/// discarded).
pub fn to_prague(time: NaiveTime) -> Option<NaiveTime> {
    let (year, month, day) = ANCHOR;
    let anchor = NaiveDate::from_ymd_opt(year, month, day)?;
    let eastern = New_York.from_local_datetime(&anchor.and_time(time)).single()?;
    Some(eastern.with_timezone(&Prague).time())
}
