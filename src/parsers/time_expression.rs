//! Detection of cooking times ("5-7 minutes", "1 hour and 30 minutes",
//! "five minutes") in free instruction text, for highlighting and timers.
//!
//! Number words cover one to ninety-nine; tens and ones combine with a
//! hyphen or whitespace ("twenty-five", "twenty five"). Ranges report their
//! smaller endpoint.

use std::ops::Range;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};

/// Only this many leading bytes of a text are scanned.
const MAX_SCAN_LEN: usize = 64 * 1024;

const ONES: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
];

const TEENS: &[(&str, u32)] = &[
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u32)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const HOUR_UNITS: &str = "hours|hour|hrs|hr";
const MINUTE_UNITS: &str = "minutes|minute|mins|min";
const SECOND_UNITS: &str = "seconds|second|secs|sec";

/// Compound > range > decimal > simple; the regex engine picks the first
/// alternative that matches at the leftmost position.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&build_pattern()).expect("Invalid time expression regex"));

/// A time mention found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTimeSpan {
    /// Byte range of the expression within the scanned text.
    pub span: Range<usize>,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DetectedTimeSpan {
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.total_seconds())
    }
}

#[derive(Clone, Copy)]
enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        if token.starts_with('h') {
            Some(TimeUnit::Hours)
        } else if token.starts_with('m') {
            Some(TimeUnit::Minutes)
        } else if token.starts_with('s') {
            Some(TimeUnit::Seconds)
        } else {
            None
        }
    }
}

/// Find every non-overlapping time expression in `text`, in order.
pub fn detect(text: &str) -> Vec<DetectedTimeSpan> {
    let text = scan_window(text);
    TIME_REGEX
        .captures_iter(text)
        .filter(|caps| caps.get(0).is_some_and(|m| !continues_decimal(text, m.start())))
        .filter_map(|caps| resolve(&caps))
        .filter(|span| span.total_seconds() > 0)
        .collect()
}

fn scan_window(text: &str) -> &str {
    if text.len() <= MAX_SCAN_LEN {
        return text;
    }
    let mut end = MAX_SCAN_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// A match starting at the "5" of "1.23456" is the tail of a longer number.
fn continues_decimal(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    matches!(before.next(), Some('.' | ','))
        && before.next().is_some_and(|c| c.is_ascii_digit())
}

fn resolve(caps: &Captures) -> Option<DetectedTimeSpan> {
    let whole = caps.get(0)?;
    let mut detected = DetectedTimeSpan {
        span: whole.start()..whole.end(),
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    let number = |name: &str| caps.name(name).and_then(|m| parse_number(m.as_str()));
    let first_of = |names: &[&str]| names.iter().find_map(|name| caps.name(name));

    let compound_hours = first_of(&["c_h", "c_h2"]);
    let compound_minutes = first_of(&["c_m", "c_m3"]);
    let compound_seconds = first_of(&["c_s", "c_s2", "c_s3"]);

    if compound_hours.is_some() || compound_minutes.is_some() || compound_seconds.is_some() {
        detected.hours = component_value(compound_hours)?;
        detected.minutes = component_value(compound_minutes)?;
        detected.seconds = component_value(compound_seconds)?;
    } else if let Some(unit) = caps.name("r_unit") {
        let unit = TimeUnit::from_token(unit.as_str())?;
        if let (Some(low), Some(high)) = (caps.name("r_lo"), caps.name("r_hi")) {
            let low = low.as_str();
            let high = high.as_str();
            let smaller = if decimal_value(high)? < decimal_value(low)? { high } else { low };
            apply_value(&mut detected, smaller, unit)?;
        } else {
            let low = caps.name("rw_lo")?.as_str();
            let high = caps.name("rw_hi")?.as_str();
            let value = match caps.name("rw_sep").map(|m| m.as_str()) {
                // "twenty-three" is one number, not the range 20 to 3
                Some("-") if lookup(TENS, &low.to_lowercase()).is_some()
                    && lookup(ONES, &high.to_lowercase()).is_some() =>
                {
                    parse_number(&format!("{low}-{high}"))?
                }
                _ => parse_number(low)?.min(parse_number(high)?),
            };
            assign(&mut detected, unit, value);
        }
    } else if let (Some(value), Some(unit)) = (caps.name("d_value"), caps.name("d_unit")) {
        apply_decimal(&mut detected, value.as_str(), TimeUnit::from_token(unit.as_str())?)?;
    } else {
        let unit = TimeUnit::from_token(caps.name("s_unit")?.as_str())?;
        assign(&mut detected, unit, number("s_value")?);
    }

    Some(detected)
}

/// Value of a compound component; an absent component counts as zero but
/// an unreadable one rejects the match.
fn component_value(component: Option<regex::Match<'_>>) -> Option<u32> {
    match component {
        Some(m) => parse_number(m.as_str()),
        None => Some(0),
    }
}

fn decimal_value(token: &str) -> Option<f64> {
    token.replace(',', ".").parse().ok()
}

/// Assign a whole or decimal quantity of `unit`.
fn apply_value(detected: &mut DetectedTimeSpan, token: &str, unit: TimeUnit) -> Option<()> {
    if token.contains(['.', ',']) {
        apply_decimal(detected, token, unit)
    } else {
        assign(detected, unit, token.parse().ok()?);
        Some(())
    }
}

fn assign(detected: &mut DetectedTimeSpan, unit: TimeUnit, value: u32) {
    match unit {
        TimeUnit::Hours => detected.hours = value,
        TimeUnit::Minutes => detected.minutes = value,
        TimeUnit::Seconds => detected.seconds = value,
    }
}

/// Split a decimal into the unit and its truncated sub-unit, working on the
/// digits directly so that "0.7" hours is 42 minutes, not 41.
fn apply_decimal(detected: &mut DetectedTimeSpan, value: &str, unit: TimeUnit) -> Option<()> {
    let (integer, fraction) = value.split_once(['.', ','])?;
    let integer: u32 = integer.parse().ok()?;
    let numerator: u64 = fraction.parse().ok()?;
    let denominator = 10u64.checked_pow(u32::try_from(fraction.len()).ok()?)?;
    let sub_unit = u32::try_from(numerator * 60 / denominator).ok()?;

    match unit {
        TimeUnit::Hours => {
            detected.hours = integer;
            detected.minutes = sub_unit;
        }
        TimeUnit::Minutes => {
            detected.minutes = integer;
            detected.seconds = sub_unit;
        }
        TimeUnit::Seconds => detected.seconds = integer,
    }
    Some(())
}

/// Digits, a number word, or a hyphenated tens-ones compound.
fn parse_number(token: &str) -> Option<u32> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok();
    }

    let token = token.to_lowercase();
    if let Some((tens, ones)) = token.split_once(|c: char| c == '-' || c.is_whitespace()) {
        return Some(lookup(TENS, tens)? + lookup(ONES, ones.trim_start())?);
    }

    lookup(ONES, &token)
        .or_else(|| lookup(TEENS, &token))
        .or_else(|| lookup(TENS, &token))
}

fn lookup(table: &[(&str, u32)], word: &str) -> Option<u32> {
    table
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
}

fn build_pattern() -> String {
    let mut words: Vec<&str> = ONES
        .iter()
        .chain(TEENS)
        .chain(TENS)
        .map(|(name, _)| *name)
        .collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()));

    let tens = TENS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join("|");
    let ones = ONES.iter().map(|(name, _)| *name).collect::<Vec<_>>().join("|");
    let word = format!(r"(?:(?:{tens})(?:-|\s+)(?:{ones})|{})", words.join("|"));
    let number = format!(r"(?:\d{{1,5}}|{word})");
    let unit = format!("(?:{HOUR_UNITS}|{MINUTE_UNITS}|{SECOND_UNITS})");
    let sep = r"(?:\s*,\s*|\s+)(?:and\s+)?";

    let hours = |name: &str| format!(r"(?P<{name}>{number})\s*(?:{HOUR_UNITS})");
    let minutes = |name: &str| format!(r"(?P<{name}>{number})\s*(?:{MINUTE_UNITS})");
    let seconds = |name: &str| format!(r"(?P<{name}>{number})\s*(?:{SECOND_UNITS})");

    // Compound parts must appear largest unit first. Group names cannot repeat,
    // so each shape gets its own c_* names and `resolve` folds them together.
    let compound = format!(
        "(?:{h}{sep}{m}(?:{sep}{s})?|{h2}{sep}{s2}|{m3}{sep}{s3})",
        h = hours("c_h"),
        m = minutes("c_m"),
        s = seconds("c_s"),
        h2 = hours("c_h2"),
        s2 = seconds("c_s2"),
        m3 = minutes("c_m3"),
        s3 = seconds("c_s3"),
    );

    // A bare "twenty-three" also matches the word range; `resolve` folds it
    // back into one number.
    let digits = r"\d{1,5}(?:[.,]\d{1,4})?";
    let range_sep = r"\s*[-–—]\s*|\s+to\s+";
    let range = format!(
        r"(?:(?:(?P<r_lo>{digits})(?:{range_sep})(?P<r_hi>{digits})|(?P<rw_lo>{number})(?P<rw_sep>{range_sep})(?P<rw_hi>{number}))\s*(?P<r_unit>{unit}))"
    );
    let decimal = format!(r"(?:(?P<d_value>\d{{1,5}}[.,]\d{{1,4}})\s*(?P<d_unit>{unit}))");
    let simple = format!(r"(?:(?P<s_value>{number})\s*(?P<s_unit>{unit}))");

    format!(r"(?i)\b(?:{compound}|{range}|{decimal}|{simple})\b")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(text: &str) -> Vec<(u32, u32, u32)> {
        detect(text)
            .into_iter()
            .map(|span| (span.hours, span.minutes, span.seconds))
            .collect()
    }

    #[test]
    fn test_simple_expression() {
        let found = detect("Cook for 3 minutes");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].hours, found[0].minutes, found[0].seconds), (0, 3, 0));
        assert_eq!(&"Cook for 3 minutes"[found[0].span.clone()], "3 minutes");
    }

    #[test]
    fn test_compound_expression() {
        assert_eq!(triples("Bake for 1 hour and 30 minutes"), vec![(1, 30, 0)]);
        assert_eq!(triples("Roast 2 hrs 15 mins 30 secs"), vec![(2, 15, 30)]);
        assert_eq!(triples("Whisk 1 minute, 30 seconds"), vec![(0, 1, 30)]);
        assert_eq!(triples("one hour and twenty minutes"), vec![(1, 20, 0)]);
    }

    #[test]
    fn test_compound_requires_descending_units() {
        assert_eq!(
            triples("Bake 5 minutes 10 minutes more"),
            vec![(0, 5, 0), (0, 10, 0)]
        );
    }

    #[test]
    fn test_range_uses_minimum() {
        assert_eq!(triples("Simmer 5-7 minutes"), vec![(0, 5, 0)]);
        assert_eq!(triples("Simmer 5 to 7 minutes"), vec![(0, 5, 0)]);
        assert_eq!(triples("Rest 10 – 8 min"), vec![(0, 8, 0)]);
        assert_eq!(triples("five to seven minutes"), vec![(0, 5, 0)]);
    }

    #[test]
    fn test_range_span_covers_both_endpoints() {
        let text = "Simmer 5-7 minutes.";
        let found = detect(text);
        assert_eq!(&text[found[0].span.clone()], "5-7 minutes");
    }

    #[test]
    fn test_range_with_decimal_endpoint() {
        let text = "Bake 1.5-2 hours";
        let found = detect(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].span.clone()], "1.5-2 hours");
        assert_eq!((found[0].hours, found[0].minutes, found[0].seconds), (1, 30, 0));

        assert_eq!(triples("Simmer 3 to 2.5 minutes"), vec![(0, 2, 30)]);
    }

    #[test]
    fn test_word_range_with_dash() {
        let text = "Rest five-seven minutes";
        let found = detect(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].span.clone()], "five-seven minutes");
        assert_eq!((found[0].hours, found[0].minutes, found[0].seconds), (0, 5, 0));

        assert_eq!(triples("ten – twelve minutes"), vec![(0, 10, 0)]);
        assert_eq!(triples("twenty-five-thirty minutes"), vec![(0, 25, 0)]);
    }

    #[test]
    fn test_match_inside_longer_number_is_ignored() {
        assert!(detect("Heat 1.23456 minutes").is_empty());
    }

    #[test]
    fn test_decimal_expression() {
        assert_eq!(triples("Bake 1.5 hours"), vec![(1, 30, 0)]);
        assert_eq!(triples("Steep 2,5 minutes"), vec![(0, 2, 30)]);
        assert_eq!(triples("Roast 0.7 hours"), vec![(0, 42, 0)]);
        assert_eq!(triples("Blitz 1.9 seconds"), vec![(0, 0, 1)]);
    }

    #[test]
    fn test_word_numbers() {
        assert_eq!(triples("five minutes"), vec![(0, 5, 0)]);
        assert_eq!(triples("Wait twenty-three minutes"), vec![(0, 23, 0)]);
        assert_eq!(triples("Wait twenty five minutes"), vec![(0, 25, 0)]);
        assert_eq!(triples("Wait thirty seconds"), vec![(0, 0, 30)]);
        assert_eq!(triples("Chill for Twelve hours"), vec![(12, 0, 0)]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(triples("COOK 10 MINUTES"), vec![(0, 10, 0)]);
    }

    #[test]
    fn test_multiple_spans_in_order() {
        let text = "Boil 10 minutes, then rest 5 min. Serve.";
        let found = detect(text);
        assert_eq!(found.len(), 2);
        assert_eq!(&text[found[0].span.clone()], "10 minutes");
        assert_eq!(&text[found[1].span.clone()], "5 min");
        assert!(found[0].span.end <= found[1].span.start);
    }

    #[test]
    fn test_no_time_mentions() {
        assert!(detect("Stir well and season to taste.").is_empty());
        assert!(detect("Preheat the oven to 350 degrees").is_empty());
        assert!(detect("Add 5 mince pies").is_empty());
        assert!(detect("").is_empty());
    }

    #[test]
    fn test_zero_duration_is_discarded() {
        assert!(detect("0 minutes").is_empty());
        assert!(detect("0-5 minutes").is_empty());
    }

    #[test]
    fn test_unknown_words_are_not_numbers() {
        assert!(detect("several minutes").is_empty());
        assert!(detect("someone minutes").is_empty());
    }

    #[test]
    fn test_durations() {
        let found = detect("1 hour and 30 minutes");
        assert_eq!(found[0].total_seconds(), 5400);
        assert_eq!(found[0].as_duration(), Duration::from_secs(5400));
    }

    #[test]
    fn test_long_text_is_bounded() {
        let mut text = "a ".repeat(MAX_SCAN_LEN);
        text.push_str("5 minutes");
        assert!(detect(&text).is_empty());
    }
}
