use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Built-in crop factors keyed by the EXIF `Model` string
pub const DEFAULT_CROP_FACTORS: &[(&str, f64)] = &[
    // Canon APS-C
    ("Canon EOS 90D", 1.6),
    ("Canon EOS 7D Mark II", 1.6),
    ("Canon EOS R7", 1.6),
    ("Canon EOS R10", 1.6),
    ("Canon EOS M50m2", 1.6),
    // Nikon DX
    ("NIKON D7500", 1.5),
    ("NIKON D500", 1.5),
    ("NIKON Z 50", 1.5),
    // Sony APS-C
    ("ILCE-6000", 1.5),
    ("ILCE-6400", 1.5),
    ("ILCE-6700", 1.5),
    // Fujifilm X
    ("X-T4", 1.5),
    ("X-T5", 1.5),
    ("X-S10", 1.5),
    ("X100V", 1.5),
    // Micro Four Thirds
    ("E-M1MarkII", 2.0),
    ("E-M5MarkIII", 2.0),
    ("DC-G9", 2.0),
    ("DC-GH5", 2.0),
];

/// Factor used when an entered value is unusable (full frame, no correction)
pub const FULL_FRAME: f64 = 1.0;

/// Largest accepted multiplier. Even 1/3" phone sensors stay well below it.
pub const MAX_CROP_FACTOR: f64 = 20.0;

/// Coerce a multiplier into the valid range: non-finite values and values
/// outside `(0, MAX_CROP_FACTOR]` become [`FULL_FRAME`].
pub fn coerce_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 && factor <= MAX_CROP_FACTOR {
        factor
    } else {
        FULL_FRAME
    }
}

/// Parse a user-entered multiplier, falling back to [`FULL_FRAME`]
pub fn parse_factor(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(coerce_factor)
        .unwrap_or(FULL_FRAME)
}

/// Read a multiplier from any JSON value. Numbers are coerced, strings are
/// parsed, everything else is [`FULL_FRAME`].
pub fn factor_from_json(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(coerce_factor).unwrap_or(FULL_FRAME),
        serde_json::Value::String(s) => parse_factor(s),
        _ => FULL_FRAME,
    }
}

/// Mapping from camera model to crop factor. Every stored value is > 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>", into = "BTreeMap<String, f64>")]
pub struct CropFactorTable {
    factors: BTreeMap<String, f64>,
}

impl CropFactorTable {
    /// Empty table: every model is treated as full frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with [`DEFAULT_CROP_FACTORS`]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (model, factor) in DEFAULT_CROP_FACTORS {
            table.set(*model, *factor);
        }
        table
    }

    pub fn get(&self, model: &str) -> Option<f64> {
        self.factors.get(model).copied()
    }

    /// Set a factor, returning the effective (coerced) value
    pub fn set(&mut self, model: impl Into<String>, factor: f64) -> f64 {
        let factor = coerce_factor(factor);
        self.factors.insert(model.into(), factor);
        factor
    }

    /// Set a factor from raw text, returning the effective value
    pub fn set_from_str(&mut self, model: impl Into<String>, raw: &str) -> f64 {
        self.set(model, parse_factor(raw))
    }

    pub fn remove(&mut self, model: &str) -> Option<f64> {
        self.factors.remove(model)
    }

    /// Apply every entry of `overrides` on top of this table
    pub fn merge(&mut self, overrides: &CropFactorTable) {
        for (model, factor) in overrides.iter() {
            self.set(model, factor);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.factors.iter().map(|(model, factor)| (model.as_str(), *factor))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for CropFactorTable {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let factors = raw
            .into_iter()
            .map(|(model, factor)| (model, factor_from_json(&factor)))
            .collect();
        Self { factors }
    }
}

impl From<CropFactorTable> for BTreeMap<String, f64> {
    fn from(table: CropFactorTable) -> Self {
        table.factors
    }
}
