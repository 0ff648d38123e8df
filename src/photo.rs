use serde::{Deserialize, Serialize};

/// Label used for photos that lack a value for the requested attribute
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Metadata of a single photo as read from its EXIF block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    /// Path relative to the library root
    pub path: String,
    /// Folder relative to the library root ("." for the root itself)
    pub folder: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub lens_model: Option<String>,
    /// Physical focal length in millimeters
    pub focal_length: Option<f64>,
    /// Camera-reported 35mm-equivalent focal length
    pub focal_length_in_35mm: Option<f64>,
    pub aperture: Option<f64>,
    pub iso: Option<u32>,
    pub exposure_time: Option<String>,
    pub taken_at: Option<String>,
}

/// A photo field that can be used as a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attribute {
    Make,
    Model,
    Lens,
    Aperture,
    Iso,
    Exposure,
    Year,
    Folder,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Make => "make",
            Attribute::Model => "model",
            Attribute::Lens => "lens",
            Attribute::Aperture => "aperture",
            Attribute::Iso => "iso",
            Attribute::Exposure => "exposure",
            Attribute::Year => "year",
            Attribute::Folder => "folder",
        }
    }

    /// Read this attribute from a photo. Blank strings count as absent.
    pub fn value(&self, photo: &PhotoMetadata) -> Option<String> {
        let value = match self {
            Attribute::Make => photo.make.clone(),
            Attribute::Model => photo.model.clone(),
            Attribute::Lens => photo.lens_model.clone(),
            Attribute::Aperture => photo.aperture.map(|f| format!("f/{:.1}", f)),
            Attribute::Iso => photo.iso.map(|iso| iso.to_string()),
            Attribute::Exposure => photo.exposure_time.clone(),
            Attribute::Year => photo.taken_at.as_deref().and_then(year_of),
            Attribute::Folder => Some(photo.folder.clone()),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Like [`Attribute::value`], but missing values map to [`UNKNOWN_LABEL`]
    pub fn label(&self, photo: &PhotoMetadata) -> String {
        self.value(photo)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leading four-digit year of an EXIF timestamp ("2023:05:01 ..." or "2023-05-01 ...")
fn year_of(timestamp: &str) -> Option<String> {
    let year = timestamp.trim().get(..4)?;
    year.chars()
        .all(|c| c.is_ascii_digit())
        .then(|| year.to_string())
}
