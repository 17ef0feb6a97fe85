//! Timestamp <-> save tick conversion
//!
//! Timestamps are persisted as signed 100-nanosecond ticks counted from
//! 1601-01-01T00:00:00Z (the FILETIME layout older save files already use).
//! An absent timestamp reads as tick zero, i.e. the epoch itself.

use chrono::{DateTime, TimeDelta, Utc};

/// Ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Seconds between 1601-01-01 and 1970-01-01
pub const UNIX_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// Tick value of the Unix epoch
pub const UNIX_EPOCH_TICKS: i64 = UNIX_EPOCH_OFFSET_SECS * TICKS_PER_SECOND;

/// Tick zero (1601-01-01T00:00:00Z)
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default() - TimeDelta::seconds(UNIX_EPOCH_OFFSET_SECS)
}

/// Decode persisted ticks
pub fn ticks_to_datetime(ticks: i64) -> DateTime<Utc> {
    let secs = ticks.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_OFFSET_SECS;
    let nanos = (ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    // i64 ticks span ~29k years either side of 1601, well inside chrono's range
    DateTime::from_timestamp(secs, nanos).unwrap_or_else(epoch)
}

/// Encode a timestamp as ticks, truncating sub-tick precision.
///
/// Returns `None` when the instant lies outside the i64 tick range.
pub fn datetime_to_ticks(value: DateTime<Utc>) -> Option<i64> {
    // Leap-second representations carry nanos >= 1s; fold them into the last tick
    let nanos = value.timestamp_subsec_nanos().min(999_999_999);
    let ticks = (value.timestamp() as i128 + UNIX_EPOCH_OFFSET_SECS as i128)
        * TICKS_PER_SECOND as i128
        + (nanos / 100) as i128;
    i64::try_from(ticks).ok()
}
