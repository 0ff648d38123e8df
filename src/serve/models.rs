use serde::{Deserialize, Serialize};

use crate::cli::GroupBy;
use crate::filter::PhotoFilter;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct StatsRequest {
    pub group_by: GroupBy,
    pub ranges: Option<String>,
    pub continuous: bool,
    pub filter: PhotoFilter,
}

/// Accepts any JSON value; anything that is not a positive number (or a
/// string holding one) becomes 1.0.
#[derive(Deserialize)]
pub struct SetCropFactorRequest {
    pub factor: serde_json::Value,
}

#[derive(Serialize)]
pub struct CropFactorResponse {
    pub model: String,
    pub factor: f64,
}

#[derive(Serialize)]
pub struct RescanResponse {
    pub photos: usize,
}
