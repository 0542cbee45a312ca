// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decimal-with-unit duration syntax used by the result line format.
//!
//! Durations on the wire look like `"1.5s"`, `"250ms"` or `"1m30s"`: one or
//! more decimal values each followed by a unit, summed together. This is the
//! syntax existing result files use; `humantime` cannot parse fractional
//! values like `1.5s`, so the codec lives here and is pinned by round-trip
//! tests.

use crate::errors::DurationParseError;
use std::time::Duration;

const NANOS_PER_US: u128 = 1_000;
const NANOS_PER_MS: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Formats a duration in the decimal-with-unit syntax.
///
/// The value is expressed in the largest unit not exceeding it (`ns`, `us`,
/// `ms` or `s`), with trailing zeros trimmed from the fraction: `0s`, `750ns`,
/// `1.5ms`, `2s`, `90s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    let (scale, digits, unit) = if nanos == 0 {
        return "0s".to_owned();
    } else if nanos < NANOS_PER_US {
        (1, 0, "ns")
    } else if nanos < NANOS_PER_MS {
        (NANOS_PER_US, 3, "us")
    } else if nanos < NANOS_PER_SEC {
        (NANOS_PER_MS, 6, "ms")
    } else {
        (NANOS_PER_SEC, 9, "s")
    };

    let whole = nanos / scale;
    let frac = nanos % scale;
    if frac == 0 {
        return format!("{whole}{unit}");
    }
    let mut frac = format!("{frac:0digits$}");
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{whole}.{frac}{unit}")
}

/// Parses a duration from the decimal-with-unit syntax.
///
/// Accepts one or more `<decimal><unit>` segments (`ns`, `us`/`µs`, `ms`,
/// `s`, `m`, `h`) and an optional leading `+`. `"0"` is accepted without a
/// unit. Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::new(input));
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let value: f64 = number
            .parse()
            .map_err(|_| DurationParseError::new(input))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let nanos_per_unit = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3_600e9,
            _ => return Err(DurationParseError::new(input)),
        };

        total += Duration::from_nanos((value * nanos_per_unit).round() as u64);
        rest = tail;
    }
    Ok(total)
}
