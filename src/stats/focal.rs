use crate::photo::PhotoMetadata;

use super::crop::CropFactorTable;

/// Longest plausible 35mm-equivalent focal length. Larger values come
/// from corrupt EXIF and are treated as missing.
pub const MAX_FOCAL_LENGTH: f64 = 10_000.0;

/// Whether a resolved focal length can be charted
pub fn is_plausible_focal(focal_length: f64) -> bool {
    focal_length.is_finite() && focal_length.abs() <= MAX_FOCAL_LENGTH
}

/// Round a focal length to the nearest millimeter, halves away from zero.
///
/// Used everywhere a focal length is compared as an integer, so crop-factor
/// correction, single-value rules and histogram buckets agree on boundaries.
pub fn round_focal(focal_length: f64) -> f64 {
    focal_length.round()
}

/// Compute the 35mm-equivalent focal length of a photo.
///
/// Priority: the camera-reported 35mm value when positive, then the
/// physical focal length scaled by the model's crop factor, then the
/// physical focal length as is.
pub fn equivalent_focal_length(photo: &PhotoMetadata, crop: &CropFactorTable) -> Option<f64> {
    if let Some(fl35) = photo.focal_length_in_35mm.filter(|v| *v > 0.0) {
        return Some(fl35);
    }

    let factor = photo.model.as_deref().and_then(|model| crop.get(model));
    match (factor, photo.focal_length) {
        (Some(factor), Some(fl)) => Some(round_focal(fl * factor)),
        _ => photo.focal_length,
    }
}

/// Resolve every photo, dropping photos without a usable focal length
pub fn equivalent_focal_lengths<'a>(
    photos: impl IntoIterator<Item = &'a PhotoMetadata>,
    crop: &CropFactorTable,
) -> Vec<f64> {
    photos
        .into_iter()
        .filter_map(|photo| equivalent_focal_length(photo, crop))
        .filter(|fl| is_plausible_focal(*fl))
        .collect()
}
