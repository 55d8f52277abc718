//! Relative duration expressions (`3d`, `2w`, `1h30m`, `3 days`)

use crate::error::{Error, Result};
use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;

static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*([A-Za-zµ]+)").expect("duration term pattern is valid")
});

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Nanoseconds per unit, or None for unknown units
fn unit_nanos(unit: &str) -> Option<f64> {
    let nanos = match unit.to_lowercase().as_str() {
        "ns" | "nsec" => 1.0,
        "us" | "µs" | "usec" => 1_000.0,
        "ms" | "msec" => 1_000_000.0,
        "s" | "sec" | "secs" | "second" | "seconds" => NANOS_PER_SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0 * NANOS_PER_SECOND,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0 * NANOS_PER_SECOND,
        "d" | "day" | "days" => 86_400.0 * NANOS_PER_SECOND,
        "w" | "wk" | "wks" | "week" | "weeks" => 604_800.0 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

/// Parse a relative duration expression.
///
/// An expression is one or more `<number><unit>` terms, optionally separated
/// by whitespace. Terms are summed, so `1h30m` is ninety minutes.
pub fn parse_duration(expr: &str) -> Result<TimeDelta> {
    let invalid = || Error::InvalidDuration(expr.to_string());

    let mut total = TimeDelta::zero();
    let mut cursor = 0;
    let mut terms = 0;

    for caps in TERM.captures_iter(expr) {
        let (Some(whole), Some(value), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            return Err(invalid());
        };
        if !expr[cursor..whole.start()].trim().is_empty() {
            return Err(invalid());
        }
        cursor = whole.end();

        let value: f64 = value.as_str().parse().map_err(|_| invalid())?;
        let per_unit = unit_nanos(unit.as_str()).ok_or_else(invalid)?;
        let nanos = (value * per_unit).round();
        #[allow(clippy::cast_precision_loss)]
        let max_nanos = i64::MAX as f64;
        if !nanos.is_finite() || nanos >= max_nanos {
            return Err(invalid());
        }
        #[allow(clippy::cast_possible_truncation)]
        let term = TimeDelta::nanoseconds(nanos as i64);
        total = total.checked_add(&term).ok_or_else(invalid)?;
        terms += 1;
    }

    if terms == 0 || !expr[cursor..].trim().is_empty() {
        return Err(invalid());
    }
    Ok(total)
}
