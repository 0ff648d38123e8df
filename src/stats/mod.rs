//! Focal length normalization, range bucketing and attribute counting.
//!
//! Everything here is pure: callers hand in a filtered snapshot of photos
//! and a crop factor table, and get back a freshly computed [`Chart`].

mod aggregate;
mod classify;
mod crop;
mod focal;
mod histogram;
mod ranges;

pub use aggregate::aggregate;
pub(crate) use aggregate::count_labels;
pub use classify::classify;
pub use crop::{
    coerce_factor, factor_from_json, parse_factor, CropFactorTable, DEFAULT_CROP_FACTORS,
    FULL_FRAME, MAX_CROP_FACTOR,
};
pub use focal::{
    equivalent_focal_length, equivalent_focal_lengths, is_plausible_focal, round_focal,
    MAX_FOCAL_LENGTH,
};
pub use histogram::{histogram, Histogram, TOP_LABELS};
pub use ranges::{parse_ranges, RangeRule, Span, OTHER_LABEL};

use serde::Serialize;

use crate::photo::{Attribute, PhotoMetadata};

/// Range list used when the user has not configured one
pub const DEFAULT_RANGES: &str = "14-24, 25-70, 71-200, 201-600, other";

/// How photos are grouped into bars
#[derive(Debug, Clone, PartialEq)]
pub enum Grouping {
    /// Focal length buckets from a range list
    FocalRanges(String),
    /// One bucket per integer focal length
    FocalContinuous,
    /// Photo count per attribute value
    Attribute(Attribute),
}

/// A single labeled bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    /// Share of the chart total, 0-100
    pub percentage: f64,
}

/// Ordered bars ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub bars: Vec<Bar>,
    pub total: usize,
    /// Labels whose values should be annotated; empty means all of them
    pub highlighted: Vec<String>,
}

impl Chart {
    pub fn new(counts: Vec<(String, usize)>, highlighted: Vec<String>) -> Self {
        let total: usize = counts.iter().map(|(_, count)| count).sum();
        let bars = counts
            .into_iter()
            .map(|(label, count)| Bar {
                percentage: percentage(count, total),
                label,
                count,
            })
            .collect();
        Self {
            bars,
            total,
            highlighted,
        }
    }

    /// Whether the bar's value should be printed next to it
    pub fn is_annotated(&self, bar: &Bar) -> bool {
        self.highlighted.is_empty() || self.highlighted.contains(&bar.label)
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Compute the chart for a photo snapshot.
///
/// Returns `None` only in continuous mode when no photo has a focal length.
pub fn build_chart(
    photos: &[&PhotoMetadata],
    grouping: &Grouping,
    crop: &CropFactorTable,
) -> Option<Chart> {
    match grouping {
        Grouping::FocalRanges(text) => {
            let rules = parse_ranges(text);
            let focal_lengths = equivalent_focal_lengths(photos.iter().copied(), crop);
            Some(Chart::new(classify(&focal_lengths, &rules), Vec::new()))
        }
        Grouping::FocalContinuous => {
            let focal_lengths = equivalent_focal_lengths(photos.iter().copied(), crop);
            let hist = histogram(&focal_lengths)?;
            Some(Chart::new(hist.buckets, hist.top))
        }
        Grouping::Attribute(attribute) => Some(Chart::new(
            aggregate(photos.iter().copied(), *attribute),
            Vec::new(),
        )),
    }
}
