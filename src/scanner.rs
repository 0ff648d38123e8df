use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Folder label used for images directly in the library root
pub const ROOT_FOLDER: &str = ".";

/// Check if a file is an image we can read metadata from, by extension
pub fn is_image_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    matches!(
        ext.as_str(),
        "jpg" | "jpeg" | "png" | "tif" | "tiff" | "webp" | "heic" | "heif" | "avif"
            // Raw formats
            | "raw" | "cr2" | "cr3" | "nef" | "arw" | "orf" | "rw2" | "dng" | "raf"
    )
}

/// An image file found under the library root
#[derive(Debug, Clone)]
pub struct ScannedImage {
    pub path: PathBuf,
    pub relative_path: String,
    /// Parent folder relative to the root, [`ROOT_FOLDER`] for the root itself
    pub folder: String,
}

/// Walks a folder tree looking for images
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Scan all image files, sorted by path
    pub fn scan_images(&self) -> Vec<ScannedImage> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_image_file(entry.path()))
            .filter_map(|entry| self.make_scanned_image(&entry))
            .collect()
    }

    fn make_scanned_image(&self, entry: &DirEntry) -> Option<ScannedImage> {
        let path = entry.path().to_path_buf();
        let relative_path = path.strip_prefix(&self.root).ok()?.to_string_lossy().to_string();

        let folder = path
            .parent()
            .and_then(|p| p.strip_prefix(&self.root).ok())
            .map(|p| p.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ROOT_FOLDER.to_string());

        Some(ScannedImage {
            path,
            relative_path,
            folder,
        })
    }
}

/// Check if a directory entry is hidden (starts with .)
/// Never considers the root entry (depth 0) as hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
