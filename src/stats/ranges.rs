//! Parser for focal-length range lists.
//!
//! A range list is a comma-separated list of segments:
//!
//! ```text
//! 24-70, 85, 100-400+500-600, other
//! ```
//!
//! * `a-b` is an inclusive range
//! * `n` matches focal lengths that round to `n`
//! * `a-b+c-d` is a union of ranges shown as a single bar
//! * `other` collects everything no other segment matched
//!
//! Malformed segments are skipped, so a half-typed list still
//! produces a usable chart.

use std::fmt;

use super::focal::round_focal;

/// Label of the catch-all bucket
pub const OTHER_LABEL: &str = "Other";

/// Inclusive focal length interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn contains(&self, focal_length: f64) -> bool {
        self.min <= focal_length && focal_length <= self.max
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// One classification rule parsed from a range list segment
#[derive(Debug, Clone, PartialEq)]
pub enum RangeRule {
    Range(Span),
    Single(f64),
    Merged(Vec<Span>),
    Other,
}

impl RangeRule {
    /// Bar label for this rule
    pub fn label(&self) -> String {
        match self {
            RangeRule::Range(span) => format!("{}mm", span),
            RangeRule::Single(value) => format!("{}mm", value),
            RangeRule::Merged(spans) => {
                let parts: Vec<String> = spans.iter().map(|s| format!("[{}]", s)).collect();
                format!("{}mm", parts.join("+"))
            }
            RangeRule::Other => OTHER_LABEL.to_string(),
        }
    }

    /// Whether this rule captures the focal length. `Other` never does;
    /// it only receives values nothing else matched.
    pub fn matches(&self, focal_length: f64) -> bool {
        match self {
            RangeRule::Range(span) => span.contains(focal_length),
            RangeRule::Single(value) => round_focal(focal_length) == *value,
            RangeRule::Merged(spans) => spans.iter().any(|s| s.contains(focal_length)),
            RangeRule::Other => false,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, RangeRule::Other)
    }
}

/// Parse a range list into rules, in input order
pub fn parse_ranges(text: &str) -> Vec<RangeRule> {
    text.split(',').filter_map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<RangeRule> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    if segment.eq_ignore_ascii_case("other") {
        return Some(RangeRule::Other);
    }

    if segment.contains('+') {
        // Any bad part invalidates the whole union
        let spans = segment
            .split('+')
            .map(parse_span)
            .collect::<Option<Vec<_>>>()?;
        return Some(RangeRule::Merged(spans));
    }

    if !segment.contains('-') {
        return parse_number(segment).map(RangeRule::Single);
    }

    parse_span(segment).map(RangeRule::Range)
}

fn parse_span(text: &str) -> Option<Span> {
    let (min, max) = text.split_once('-')?;
    Some(Span {
        min: parse_number(min)?,
        max: parse_number(max)?,
    })
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
