use std::path::Path;

use anyhow::Result;

use crate::filter::FilterOptions;
use crate::library::load_library;

/// List the folders, models and lenses available as filter values
pub fn run_options(library_path: &Path) -> Result<FilterOptions> {
    let photos = load_library(library_path, true)?;
    Ok(FilterOptions::from_photos(&photos))
}
