//! Leading quantity and unit parsing for ingredient lines, plus scaling.
//!
//! `"1 ½ cups sugar"` parses to a quantity of 1.5 with unit `"cups"`; scaling
//! it by 2 rewrites the line to `"3 cups sugar"` while leaving the rest of
//! the text untouched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::units::UNITS_SORTED;

/// Lines longer than this are left alone.
const MAX_LINE_LEN: usize = 4096;

/// Scaled values this close to a whole number print without decimals.
const INTEGRAL_EPSILON: f64 = 1e-4;

const COMMON_FRACTION_TOLERANCE: f64 = 0.01;

const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('⅓', 0.333333),
    ('⅔', 0.666667),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 0.166667),
    ('⅚', 0.833333),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Eighths used when rendering a scaled quantity.
const EIGHTHS: &[(f64, char)] = &[
    (0.125, '⅛'),
    (0.25, '¼'),
    (0.375, '⅜'),
    (0.5, '½'),
    (0.625, '⅝'),
    (0.75, '¾'),
    (0.875, '⅞'),
];

static MIXED_FRACTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)").expect("Invalid mixed fraction regex"));

static FRACTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)/(\d+)").expect("Invalid fraction regex"));

static UNICODE_FRACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let glyphs: String = UNICODE_FRACTIONS.iter().map(|(glyph, _)| *glyph).collect();
    Regex::new(&format!(r"^(?:(\d+(?:[.,]\d+)?) ?)?([{glyphs}])"))
        .expect("Invalid unicode fraction regex")
});

static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[.,](\d+)").expect("Invalid decimal regex"));

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("Invalid integer regex"));

/// A unit directly after the quantity (one optional space), ending at a
/// non-alphanumeric character or the end of the line.
static UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = UNITS_SORTED
        .iter()
        .map(|unit| regex::escape(unit))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^ ?({alternation})(?:[^\p{{L}}\p{{N}}]|$)"))
        .expect("Invalid unit regex")
});

/// Result of parsing the leading quantity of an ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub original_text: String,
    pub quantity: Option<f64>,
    /// Unit as written in the source, e.g. `"Tbsp"`.
    pub unit: Option<String>,
    /// Byte range of quantity (and unit, if any) within `original_text`.
    pub matched_span: Option<Range<usize>>,
    /// `original_text` with `matched_span` cut out.
    pub remainder: String,
}

impl ParsedQuantity {
    pub fn parse(line: &str) -> Self {
        let unparsed = Self {
            original_text: line.to_string(),
            quantity: None,
            unit: None,
            matched_span: None,
            remainder: line.to_string(),
        };
        if line.len() > MAX_LINE_LEN {
            return unparsed;
        }

        let trimmed = line.trim_start();
        let start = line.len() - trimmed.len();
        let Some((quantity, quantity_len)) = leading_quantity(trimmed) else {
            return unparsed;
        };

        let mut end = start + quantity_len;
        let mut unit = None;
        if let Some(unit_match) = UNIT_REGEX.captures(&line[end..]).and_then(|caps| caps.get(1)) {
            unit = Some(unit_match.as_str().to_string());
            end += unit_match.end();
        }

        Self {
            original_text: line.to_string(),
            quantity: Some(quantity),
            unit,
            matched_span: Some(start..end),
            remainder: format!("{}{}", &line[..start], &line[end..]),
        }
    }

    pub fn has_quantity(&self) -> bool {
        self.quantity.is_some()
    }

    /// Rewrite the line with the quantity multiplied by `multiplier`.
    ///
    /// Text outside the matched span is kept verbatim. Lines without a
    /// quantity, and a multiplier of exactly 1, return the original text.
    pub fn scaled(&self, multiplier: f64) -> String {
        let (Some(quantity), Some(span)) = (self.quantity, self.matched_span.as_ref()) else {
            return self.original_text.clone();
        };
        if multiplier == 1.0 || !multiplier.is_finite() {
            return self.original_text.clone();
        }

        let mut replacement = format_quantity(quantity * multiplier);
        if let Some(unit) = &self.unit {
            replacement.push(' ');
            replacement.push_str(unit);
        }

        format!(
            "{}{}{}",
            &self.original_text[..span.start],
            replacement,
            &self.original_text[span.end..]
        )
    }
}

/// Parse the leading quantity of `line`.
pub fn parse(line: &str) -> ParsedQuantity {
    ParsedQuantity::parse(line)
}

/// Scale the leading quantity of an ingredient line.
pub fn scale_ingredient(line: &str, multiplier: f64) -> String {
    ParsedQuantity::parse(line).scaled(multiplier)
}

/// Render a quantity for display, preferring fraction glyphs for eighths.
pub fn format_quantity(value: f64) -> String {
    if (value - value.round()).abs() < INTEGRAL_EPSILON {
        return format!("{:.0}", value.round());
    }

    let whole = value.trunc();
    let fraction = value - whole;

    if let Some(glyph) = nearest_eighth(fraction) {
        return if whole == 0.0 {
            glyph.to_string()
        } else {
            format!("{whole:.0} {glyph}")
        };
    }

    if fraction < 0.05 {
        format!("{:.0}", value.round())
    } else if whole != 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// Quantity value and its byte length at the start of `text`.
///
/// The first grammar that matches decides the outcome; a zero denominator
/// yields `None` rather than falling through to a shorter form.
fn leading_quantity(text: &str) -> Option<(f64, usize)> {
    if let Some(caps) = MIXED_FRACTION_REGEX.captures(text) {
        let whole: f64 = caps[1].parse().ok()?;
        let fraction = divide(&caps[2], &caps[3])?;
        return Some((whole + fraction, caps[0].len()));
    }

    if let Some(caps) = FRACTION_REGEX.captures(text) {
        return Some((divide(&caps[1], &caps[2])?, caps[0].len()));
    }

    if let Some(caps) = UNICODE_FRACTION_REGEX.captures(text) {
        let whole = match caps.get(1) {
            Some(m) => parse_decimal(m.as_str())?,
            None => 0.0,
        };
        let glyph = caps[2].chars().next()?;
        let fraction = glyph_value(glyph)?;
        return Some((whole + fraction, caps[0].len()));
    }

    if let Some(m) = DECIMAL_REGEX.find(text) {
        return Some((parse_decimal(m.as_str())?, m.end()));
    }

    INTEGER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok().map(|value| (value, m.end())))
}

fn divide(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".").parse().ok()
}

fn glyph_value(glyph: char) -> Option<f64> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(candidate, _)| *candidate == glyph)
        .map(|(_, value)| *value)
}

fn nearest_eighth(fraction: f64) -> Option<char> {
    EIGHTHS
        .iter()
        .find(|(value, _)| (fraction - value).abs() <= COMMON_FRACTION_TOLERANCE)
        .map(|(_, glyph)| *glyph)
}
