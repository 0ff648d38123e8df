use std::collections::HashMap;

use crate::photo::{Attribute, PhotoMetadata};

/// Count photos per attribute value, most common first.
///
/// Photos without the attribute are counted under "Unknown". Equal counts
/// keep the order in which values were first seen.
pub fn aggregate<'a>(
    photos: impl IntoIterator<Item = &'a PhotoMetadata>,
    attribute: Attribute,
) -> Vec<(String, usize)> {
    count_labels(photos.into_iter().map(|photo| attribute.label(photo)))
}

/// Count labels in order of first appearance, then sort by descending count
pub(crate) fn count_labels(labels: impl IntoIterator<Item = String>) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for label in labels {
        match index.get(&label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_model(model: Option<&str>) -> PhotoMetadata {
        PhotoMetadata {
            model: model.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_by_model() {
        let photos = vec![
            with_model(Some("X-T5")),
            with_model(None),
            with_model(Some("ILCE-6400")),
            with_model(Some("ILCE-6400")),
            with_model(Some("")),
            with_model(Some("ILCE-6400")),
        ];

        let counts = aggregate(&photos, Attribute::Model);
        assert_eq!(
            counts,
            vec![
                ("ILCE-6400".to_string(), 3),
                ("Unknown".to_string(), 2),
                ("X-T5".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let photos = vec![
            with_model(Some("B")),
            with_model(Some("A")),
            with_model(Some("C")),
            with_model(Some("A")),
            with_model(Some("B")),
        ];

        let labels: Vec<String> = aggregate(&photos, Attribute::Model)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_aggregate_empty() {
        let photos: Vec<PhotoMetadata> = Vec::new();
        assert!(aggregate(&photos, Attribute::Lens).is_empty());
    }

    #[test]
    fn test_aggregate_by_iso() {
        let photos = vec![
            PhotoMetadata { iso: Some(100), ..Default::default() },
            PhotoMetadata { iso: Some(3200), ..Default::default() },
            PhotoMetadata { iso: Some(100), ..Default::default() },
        ];
        let counts = aggregate(&photos, Attribute::Iso);
        assert_eq!(counts[0], ("100".to_string(), 2));
        assert_eq!(counts[1], ("3200".to_string(), 1));
    }
}
