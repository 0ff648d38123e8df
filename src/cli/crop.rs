use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::stats::DEFAULT_CROP_FACTORS;

/// Where an effective crop factor comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CropSource {
    Default,
    User,
}

/// One row of the effective crop factor table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropEntry {
    pub model: String,
    pub factor: f64,
    pub source: CropSource,
}

fn load(settings_path: &Path) -> Result<Settings> {
    Settings::load(settings_path)
        .with_context(|| format!("Failed to load settings: {}", settings_path.display()))
}

/// Effective crop factors (defaults with overrides applied), sorted by model
pub fn run_crop_list(settings_path: &Path) -> Result<Vec<CropEntry>> {
    let settings = load(settings_path)?;
    Ok(crop_entries(&settings))
}

pub(crate) fn crop_entries(settings: &Settings) -> Vec<CropEntry> {
    settings
        .crop_table()
        .iter()
        .map(|(model, factor)| CropEntry {
            model: model.to_string(),
            factor,
            source: if settings.crop_factors.get(model).is_some() {
                CropSource::User
            } else {
                CropSource::Default
            },
        })
        .collect()
}

/// Store a crop factor override. Returns the effective value, which is
/// 1.0 when `raw` is not a positive number.
pub fn run_crop_set(settings_path: &Path, model: &str, raw: &str) -> Result<f64> {
    let mut settings = load(settings_path)?;
    let factor = settings.crop_factors.set_from_str(model, raw);
    settings.save(settings_path)?;
    info!(model, factor, "crop factor set");
    Ok(factor)
}

/// Remove an override. Returns the factor the model falls back to, if any.
pub fn run_crop_unset(settings_path: &Path, model: &str) -> Result<Option<f64>> {
    let mut settings = load(settings_path)?;
    if settings.crop_factors.remove(model).is_some() {
        settings.save(settings_path)?;
        info!(model, "crop factor override removed");
    }
    Ok(DEFAULT_CROP_FACTORS
        .iter()
        .find(|(m, _)| *m == model)
        .map(|(_, factor)| *factor))
}

/// Drop every override. Returns how many were removed.
pub fn run_crop_reset(settings_path: &Path) -> Result<usize> {
    let mut settings = load(settings_path)?;
    let removed = settings.crop_factors.len();
    if removed > 0 {
        settings.crop_factors = Default::default();
        settings.save(settings_path)?;
    }
    info!(removed, "crop factor overrides reset");
    Ok(removed)
}
