//! Rendering of last-accessed epoch timestamps.
//!
//! Hymnal Browser stores the last access as seconds since the Unix epoch. The
//! spreadsheet wants the familiar `M/D/YYYY h:mm:ss AM` form, in local time,
//! without the comma that normally separates date and time.

use std::fmt;

use chrono::{Datelike, Local, TimeZone};

/// Text emitted for timestamps that do not name a representable instant.
pub const INVALID_DATE: &str = "Invalid Date";

/// Largest absolute millisecond offset a date may carry (100 million days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Render `secs` in the machine's local time zone.
pub fn format_epoch_seconds(secs: f64) -> String {
    format_epoch_seconds_in(secs, &Local)
}

/// Render `secs` in an explicit time zone.
pub fn format_epoch_seconds_in<Tz>(secs: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(millis) = epoch_millis(secs) else {
        return INVALID_DATE.to_string();
    };

    match tz.timestamp_millis_opt(millis).single() {
        Some(date) => {
            // Years are neither padded nor signed.
            let rendered = format!(
                "{}/{}/{}, {}",
                date.month(),
                date.day(),
                date.year(),
                date.format(TIME_FORMAT)
            );
            strip_first_comma(&rendered)
        }
        None => INVALID_DATE.to_string(),
    }
}

/// Seconds to whole milliseconds, truncating toward zero.
fn epoch_millis(secs: f64) -> Option<i64> {
    let millis = (secs * 1000.0).trunc();
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    Some(millis as i64)
}

fn strip_first_comma(rendered: &str) -> String {
    rendered.replacen(',', "", 1)
}
