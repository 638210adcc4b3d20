//! Normalization of hymn entries into CSV-ready records.
//!
//! The two entry shapes are decoded independently. Wrapped counts of zero or
//! less are blanked; plain counts are written as-is, whatever their sign.

use serde::Serialize;
use serde_json::Number;

use crate::document::{HymnEntry, MongoDatum};
use crate::timestamp::format_epoch_seconds;

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HymnData {
    pub id: String,
    pub queries: String,
    pub launches: String,
    pub last_accessed: String,
}

pub fn map_hymns(entries: Vec<(String, HymnEntry)>) -> Vec<HymnData> {
    entries
        .into_iter()
        .map(|(id, entry)| match entry {
            HymnEntry::Extended(data) => map_extended(id, &data),
            HymnEntry::Plain(queries, launches, last_accessed) => {
                map_plain(id, &queries, &launches, last_accessed)
            }
        })
        .collect()
}

pub fn map_extended(id: String, data: &[MongoDatum; 3]) -> HymnData {
    let [queries, launches, last_accessed] = data;

    HymnData {
        id,
        queries: positive_count(queries),
        launches: positive_count(launches),
        last_accessed: match last_accessed.number_double.as_deref() {
            Some(secs) if !secs.is_empty() => format_epoch_seconds(parse_float(secs)),
            _ => String::new(),
        },
    }
}

pub fn map_plain(
    id: String,
    queries: &Number,
    launches: &Number,
    last_accessed: Option<f64>,
) -> HymnData {
    HymnData {
        id,
        queries: number_text(queries),
        launches: number_text(launches),
        last_accessed: match last_accessed {
            Some(secs) if secs != 0.0 && !secs.is_nan() => format_epoch_seconds(secs),
            _ => String::new(),
        },
    }
}

/// Integers as written; floats in shortest form, so `5.0` reads `5`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => {
            if value == 0.0 {
                "0".to_string()
            } else {
                value.to_string()
            }
        }
        _ => number.to_string(),
    }
}

/// The wrapped decimal string, untouched, when its leading integer is
/// positive; empty otherwise.
fn positive_count(datum: &MongoDatum) -> String {
    match datum.number_int.as_deref() {
        Some(raw) if leading_integer_is_positive(raw) => raw.to_string(),
        _ => String::new(),
    }
}

/// Reads an optional sign and the digit run that follows it, ignoring any
/// trailing text. A `0x` prefix switches to hex digits. No digits means
/// "not a number", which is not positive.
fn leading_integer_is_positive(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (digits, is_digit): (&str, fn(&u8) -> bool) = match rest.get(..2) {
        Some("0x" | "0X") => (&rest[2..], u8::is_ascii_hexdigit),
        _ => (rest, u8::is_ascii_digit),
    };

    !negative && digits.bytes().take_while(is_digit).any(|b| b != b'0')
}

/// Lenient float parse over the longest numeric prefix; NaN when nothing
/// numeric leads the string.
fn parse_float(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return value;
    }

    (1..trimmed.len())
        .rev()
        .filter(|&end| trimmed.is_char_boundary(end))
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
