//! Parsing of `--since` style durations such as `24h`, `90m` or `1h30m`.

use chrono::Duration;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h|d|w))+$")
        .expect("valid duration regex")
});
static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|μs|ms|s|m|h|d|w)")
        .expect("valid duration component regex")
});

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}, expected something like 30m, 24h or 1h30m")]
    InvalidDuration(String),
}

fn unit_nanos(unit: &str) -> f64 {
    match unit {
        "ns" => 1.0,
        "us" | "µs" | "μs" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => NANOS_PER_SECOND,
        "m" => 60.0 * NANOS_PER_SECOND,
        "h" => 3_600.0 * NANOS_PER_SECOND,
        "d" => 86_400.0 * NANOS_PER_SECOND,
        "w" => 604_800.0 * NANOS_PER_SECOND,
        _ => unreachable!("unit already validated by DURATION_RE"),
    }
}

/// Parses a sequence of `<number><unit>` pairs into a duration.
///
/// A bare `0` is accepted as the zero duration.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let trimmed = input.trim();
    if trimmed == "0" {
        return Ok(Duration::zero());
    }
    if !DURATION_RE.is_match(trimmed) {
        return Err(DurationError::InvalidDuration(input.to_string()));
    }

    let mut nanos = 0.0_f64;
    for caps in COMPONENT_RE.captures_iter(trimmed) {
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| DurationError::InvalidDuration(input.to_string()))?;
        nanos += value * unit_nanos(&caps[2]);
    }

    if !nanos.is_finite() || nanos >= i64::MAX as f64 {
        return Err(DurationError::InvalidDuration(input.to_string()));
    }

    Ok(Duration::nanoseconds(nanos.round() as i64))
}
