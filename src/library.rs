use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::metadata::read_exif;
use crate::photo::PhotoMetadata;
use crate::scanner::Scanner;

/// Scan a photo folder and read the metadata of every image in it.
///
/// Photos are returned sorted by relative path. Images without readable
/// EXIF are kept with empty metadata so they still count as "Unknown".
#[instrument(skip(show_progress))]
pub fn load_library(root: &Path, show_progress: bool) -> Result<Vec<PhotoMetadata>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Library path does not exist: {}", root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Library path is not a directory: {}", root.display());
    }

    info!("scanning images");
    let images = Scanner::new(root).scan_images();
    let total = images.len();
    info!(total, "images found");

    let progress = if show_progress {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} Reading metadata [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let photos: Vec<PhotoMetadata> = images
        .into_par_iter()
        .map(|image| {
            let info = read_exif(&image.path);
            progress.inc(1);
            info.into_photo(image.relative_path, image.folder)
        })
        .collect();

    progress.finish_and_clear();

    let with_focal = photos.iter().filter(|p| p.focal_length.is_some()).count();
    debug!(with_focal, "metadata read");
    info!(photos = photos.len(), "library loaded");

    Ok(photos)
}
