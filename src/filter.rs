use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::photo::{Attribute, PhotoMetadata};
use crate::stats::count_labels;

/// Folder/model/lens selection applied before any statistics are computed.
///
/// `None` selects everything. Photos without a model or lens are matched
/// by the "Unknown" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoFilter {
    pub folders: Option<BTreeSet<String>>,
    pub models: Option<BTreeSet<String>>,
    pub lenses: Option<BTreeSet<String>>,
}

impl PhotoFilter {
    pub fn is_active(&self) -> bool {
        self.folders.is_some() || self.models.is_some() || self.lenses.is_some()
    }

    pub fn matches(&self, photo: &PhotoMetadata) -> bool {
        selected(&self.folders, Attribute::Folder, photo)
            && selected(&self.models, Attribute::Model, photo)
            && selected(&self.lenses, Attribute::Lens, photo)
    }

    /// Photos passing the filter, in their original order
    pub fn apply<'a>(&self, photos: &'a [PhotoMetadata]) -> Vec<&'a PhotoMetadata> {
        photos.iter().filter(|photo| self.matches(photo)).collect()
    }
}

fn selected(choice: &Option<BTreeSet<String>>, attribute: Attribute, photo: &PhotoMetadata) -> bool {
    match choice {
        Some(values) => values.contains(&attribute.label(photo)),
        None => true,
    }
}

/// A selectable filter value and how many photos carry it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub count: usize,
}

/// Values available for each filter dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Sorted by folder path
    pub folders: Vec<FilterOption>,
    /// Most common first
    pub models: Vec<FilterOption>,
    /// Most common first
    pub lenses: Vec<FilterOption>,
}

impl FilterOptions {
    pub fn from_photos(photos: &[PhotoMetadata]) -> Self {
        let options = |attribute: Attribute| -> Vec<FilterOption> {
            count_labels(photos.iter().map(|photo| attribute.label(photo)))
                .into_iter()
                .map(|(value, count)| FilterOption { value, count })
                .collect()
        };

        let mut folders = options(Attribute::Folder);
        folders.sort_by(|a, b| a.value.cmp(&b.value));

        Self {
            folders,
            models: options(Attribute::Model),
            lenses: options(Attribute::Lens),
        }
    }
}
