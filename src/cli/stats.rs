use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Settings;
use crate::filter::PhotoFilter;
use crate::library::load_library;
use crate::photo::{Attribute, PhotoMetadata};
use crate::stats::{build_chart, Chart, CropFactorTable, Grouping};

/// What the bars of a statistics chart represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    #[default]
    FocalLength,
    Make,
    Model,
    Lens,
    Aperture,
    Iso,
    Exposure,
    Year,
    Folder,
}

impl GroupBy {
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            GroupBy::FocalLength => None,
            GroupBy::Make => Some(Attribute::Make),
            GroupBy::Model => Some(Attribute::Model),
            GroupBy::Lens => Some(Attribute::Lens),
            GroupBy::Aperture => Some(Attribute::Aperture),
            GroupBy::Iso => Some(Attribute::Iso),
            GroupBy::Exposure => Some(Attribute::Exposure),
            GroupBy::Year => Some(Attribute::Year),
            GroupBy::Folder => Some(Attribute::Folder),
        }
    }
}

/// Options for the stats command
#[derive(Debug, Default)]
pub struct StatsOptions {
    pub group_by: GroupBy,
    /// Range list; falls back to the settings, then the default
    pub ranges: Option<String>,
    /// One bucket per millimeter instead of ranges
    pub continuous: bool,
    /// One-off `(model, factor)` crop factor overrides
    pub crop_overrides: Vec<(String, String)>,
    pub filter: PhotoFilter,
}

/// Result of the stats command
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub title: String,
    /// `None` when there was no focal length data to chart
    pub chart: Option<Chart>,
    /// Photos found in the library
    pub photos: usize,
    /// Photos left after filtering
    pub matched: usize,
}

/// Scan a library and compute the requested chart
pub fn run_stats(
    library_path: &Path,
    settings: &Settings,
    options: StatsOptions,
) -> Result<StatsReport> {
    let photos = load_library(library_path, true)?;
    Ok(compute_stats(&photos, settings, options))
}

/// Compute the chart over already loaded photos
#[instrument(skip_all)]
pub fn compute_stats(
    photos: &[PhotoMetadata],
    settings: &Settings,
    options: StatsOptions,
) -> StatsReport {
    let mut crop = settings.crop_table();
    let mut overrides = CropFactorTable::new();
    for (model, raw) in &options.crop_overrides {
        overrides.set_from_str(model.as_str(), raw);
    }
    crop.merge(&overrides);

    let grouping = grouping_for(&options, settings);
    let title = chart_title(&grouping);

    let matched = options.filter.apply(photos);
    info!(
        photos = photos.len(),
        matched = matched.len(),
        filtered = options.filter.is_active(),
        "computing chart"
    );

    StatsReport {
        title,
        chart: build_chart(&matched, &grouping, &crop),
        photos: photos.len(),
        matched: matched.len(),
    }
}

fn grouping_for(options: &StatsOptions, settings: &Settings) -> Grouping {
    if let Some(attribute) = options.group_by.attribute() {
        return Grouping::Attribute(attribute);
    }
    if options.continuous {
        return Grouping::FocalContinuous;
    }
    let ranges = options
        .ranges
        .clone()
        .unwrap_or_else(|| settings.ranges_or_default().to_string());
    Grouping::FocalRanges(ranges)
}

fn chart_title(grouping: &Grouping) -> String {
    match grouping {
        Grouping::FocalRanges(ranges) => format!("Focal length ({})", ranges.trim()),
        Grouping::FocalContinuous => "Focal length (continuous)".to_string(),
        Grouping::Attribute(attribute) => {
            let name = attribute.as_str();
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Parse a `MODEL=FACTOR` crop factor override
pub fn parse_crop_override(raw: &str) -> Result<(String, String), String> {
    match raw.rsplit_once('=') {
        Some((model, factor)) if !model.trim().is_empty() => {
            Ok((model.trim().to_string(), factor.trim().to_string()))
        }
        _ => Err(format!("expected MODEL=FACTOR, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(folder: &str, model: &str, fl: f64) -> PhotoMetadata {
        PhotoMetadata {
            path: format!("{}/p.jpg", folder),
            folder: folder.to_string(),
            model: Some(model.to_string()),
            focal_length: Some(fl),
            ..Default::default()
        }
    }

    fn library() -> Vec<PhotoMetadata> {
        vec![
            photo("trip", "ILCE-6400", 16.0), // 24 with default crop
            photo("trip", "ILCE-7M3", 85.0),
            photo("home", "ILCE-7M3", 35.0),
            photo("home", "Custom", 50.0),
        ]
    }

    fn counts(report: &StatsReport) -> Vec<(String, usize)> {
        report
            .chart
            .as_ref()
            .unwrap()
            .bars
            .iter()
            .map(|b| (b.label.clone(), b.count))
            .collect()
    }

    #[test]
    fn test_default_ranges_from_settings() {
        let settings = Settings {
            ranges: Some("24-35, other".to_string()),
            ..Default::default()
        };
        let report = compute_stats(&library(), &settings, StatsOptions::default());
        assert_eq!(report.title, "Focal length (24-35, other)");
        assert_eq!(
            counts(&report),
            vec![("24-35mm".to_string(), 2), ("Other".to_string(), 2)]
        );
        assert_eq!(report.photos, 4);
        assert_eq!(report.matched, 4);
    }

    #[test]
    fn test_explicit_ranges_and_crop_override() {
        let options = StatsOptions {
            ranges: Some("75, other".to_string()),
            crop_overrides: vec![("Custom".to_string(), "1.5".to_string())],
            ..Default::default()
        };
        let report = compute_stats(&library(), &Settings::default(), options);
        assert_eq!(
            counts(&report),
            vec![("75mm".to_string(), 1), ("Other".to_string(), 3)]
        );
    }

    #[test]
    fn test_filter_applied_before_grouping() {
        let options = StatsOptions {
            group_by: GroupBy::Model,
            filter: PhotoFilter {
                folders: Some(["home".to_string()].into_iter().collect()),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = compute_stats(&library(), &Settings::default(), options);
        assert_eq!(report.title, "Model");
        assert_eq!(report.matched, 2);
        assert_eq!(
            counts(&report),
            vec![("ILCE-7M3".to_string(), 1), ("Custom".to_string(), 1)]
        );
    }

    #[test]
    fn test_continuous_without_focal_data() {
        let photos = vec![PhotoMetadata::default()];
        let options = StatsOptions {
            continuous: true,
            ..Default::default()
        };
        let report = compute_stats(&photos, &Settings::default(), options);
        assert_eq!(report.title, "Focal length (continuous)");
        assert!(report.chart.is_none());
    }

    #[test]
    fn test_parse_crop_override() {
        assert_eq!(
            parse_crop_override("X-T5=1.5"),
            Ok(("X-T5".to_string(), "1.5".to_string()))
        );
        assert_eq!(
            parse_crop_override("Canon EOS 90D = abc"),
            Ok(("Canon EOS 90D".to_string(), "abc".to_string()))
        );
        assert!(parse_crop_override("X-T5").is_err());
        assert!(parse_crop_override("=1.5").is_err());
    }
}
