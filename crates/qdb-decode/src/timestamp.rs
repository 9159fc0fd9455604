use chrono::{DateTime, NaiveDateTime};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// 1899-12-30T00:00:00, the OLE Automation epoch, in Unix microseconds.
const OLE_EPOCH_UNIX_MICROS: i64 = -2_209_161_600_000_000;

/// Convert an OLE Automation date (days since 1899-12-30, fraction = time of
/// day) to a naive timestamp.
///
/// Accepts any float. Values beyond chrono's range clamp to
/// `NaiveDateTime::MIN`/`MAX` and NaN maps to the epoch, so the result is
/// always well formed but not necessarily plausible. The mapping never
/// decreases, which keeps store order by `date` consistent with timestamp
/// order.
pub fn normalize(date: f64) -> NaiveDateTime {
    // Float-to-int casts saturate and send NaN to 0.
    let offset = (date * MICROS_PER_DAY).round() as i64;
    let unix_micros = OLE_EPOCH_UNIX_MICROS.saturating_add(offset);

    match DateTime::from_timestamp_micros(unix_micros) {
        Some(dt) => dt.naive_utc(),
        None if unix_micros < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
