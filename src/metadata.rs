use std::path::Path;

use crate::photo::PhotoMetadata;

/// EXIF fields relevant to focal length and gear statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifInfo {
    pub make: Option<String>,
    pub model: Option<String>,
    pub lens_model: Option<String>,
    pub focal_length: Option<f64>,
    pub focal_length_in_35mm: Option<f64>,
    pub aperture: Option<f64>,
    pub iso: Option<u32>,
    pub exposure_time: Option<String>,
    pub taken_at: Option<String>,
}

impl ExifInfo {
    pub fn has_any(&self) -> bool {
        self.make.is_some()
            || self.model.is_some()
            || self.lens_model.is_some()
            || self.focal_length.is_some()
            || self.focal_length_in_35mm.is_some()
            || self.aperture.is_some()
            || self.iso.is_some()
            || self.exposure_time.is_some()
            || self.taken_at.is_some()
    }

    /// Attach file location to build the record consumed by the statistics
    pub fn into_photo(self, path: String, folder: String) -> PhotoMetadata {
        PhotoMetadata {
            path,
            folder,
            make: self.make,
            model: self.model,
            lens_model: self.lens_model,
            focal_length: self.focal_length,
            focal_length_in_35mm: self.focal_length_in_35mm,
            aperture: self.aperture,
            iso: self.iso,
            exposure_time: self.exposure_time,
            taken_at: self.taken_at,
        }
    }
}

/// Read EXIF metadata from an image file (header-only, fast).
/// Unreadable files and files without EXIF give an empty record.
pub fn read_exif(path: &Path) -> ExifInfo {
    let Ok(file) = std::fs::File::open(path) else {
        return ExifInfo::default();
    };
    let mut bufreader = std::io::BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut bufreader) else {
        return ExifInfo::default();
    };

    let get_str = |tag: exif::Tag| -> Option<String> {
        let field = exif.get_field(tag, exif::In::PRIMARY)?;
        let s = field.display_value().to_string();
        // Strip surrounding quotes that kamadak-exif adds to ASCII strings
        let s = s.trim_matches('"').trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };

    let get_rational = |tag: exif::Tag| -> Option<f64> {
        let field = exif.get_field(tag, exif::In::PRIMARY)?;
        match &field.value {
            exif::Value::Rational(vals) => vals
                .first()
                .map(|r| r.to_f64())
                .filter(|v| v.is_finite()),
            _ => None,
        }
    };

    let get_uint = |tag: exif::Tag| -> Option<u32> {
        exif.get_field(tag, exif::In::PRIMARY)?.value.get_uint(0)
    };

    ExifInfo {
        make: get_str(exif::Tag::Make),
        model: get_str(exif::Tag::Model),
        lens_model: get_str(exif::Tag::LensModel),
        focal_length: get_rational(exif::Tag::FocalLength),
        // 0 means "unknown" in the EXIF standard
        focal_length_in_35mm: get_uint(exif::Tag::FocalLengthIn35mmFilm)
            .filter(|v| *v > 0)
            .map(f64::from),
        aperture: get_rational(exif::Tag::FNumber),
        iso: get_uint(exif::Tag::PhotographicSensitivity),
        exposure_time: get_str(exif::Tag::ExposureTime),
        taken_at: get_str(exif::Tag::DateTimeOriginal).or_else(|| get_str(exif::Tag::DateTime)),
    }
}
