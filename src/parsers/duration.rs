//! ISO-8601 duration parsing for schema.org `prepTime` / `cookTime` values.
//!
//! Publishers mostly emit `PT20M`-style durations, but some pages put an
//! absolute timestamp in the field instead. Those are read as an interval
//! since the Unix epoch.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

/// Longer inputs are never durations.
const MAX_INPUT_LEN: usize = 128;

const SECONDS_PER_DAY: f64 = 86_400.0;

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:[.,]\d+)?)D)?(?:T(?:(\d+(?:[.,]\d+)?)H)?(?:(\d+(?:[.,]\d+)?)M)?(?:(\d+(?:[.,]\d+)?)S)?)?$",
    )
    .expect("Invalid duration regex")
});

/// Parse a duration string into whole minutes, rounding to the nearest minute.
///
/// Returns `None` for anything that is not a positive duration.
pub fn minutes(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() || input.len() > MAX_INPUT_LEN {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        let seconds = timestamp.timestamp() as f64
            + f64::from(timestamp.timestamp_subsec_millis()) / 1000.0;
        return seconds_to_minutes(seconds);
    }

    let captures = DURATION_REGEX.captures(input)?;
    let component = |index: usize| -> f64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    let seconds = component(1) * SECONDS_PER_DAY
        + component(2) * 3600.0
        + component(3) * 60.0
        + component(4);
    seconds_to_minutes(seconds)
}

fn seconds_to_minutes(seconds: f64) -> Option<u32> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let minutes = (seconds / 60.0).round();
    if minutes > f64::from(u32::MAX) {
        return None;
    }
    Some(minutes as u32)
}
