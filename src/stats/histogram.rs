use super::focal::{is_plausible_focal, round_focal};

/// Number of labels reported as most common
pub const TOP_LABELS: usize = 3;

/// One bucket per integer focal length between the observed extremes
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Buckets in ascending focal length order
    pub buckets: Vec<(String, usize)>,
    /// Labels of the most common buckets, most common first
    pub top: Vec<String>,
}

/// Build a continuous histogram. Returns `None` when there is nothing to
/// chart, which is distinct from a histogram of empty buckets.
///
/// Values beyond [`MAX_FOCAL_LENGTH`](crate::stats::MAX_FOCAL_LENGTH) are
/// ignored, which bounds the number of buckets.
pub fn histogram(focal_lengths: &[f64]) -> Option<Histogram> {
    let rounded: Vec<i64> = focal_lengths
        .iter()
        .filter(|fl| is_plausible_focal(**fl))
        .map(|fl| round_focal(*fl) as i64)
        .collect();

    let min = *rounded.iter().min()?;
    let max = *rounded.iter().max()?;
    let span = usize::try_from(max.checked_sub(min)?).ok()?;

    let mut counts = vec![0usize; span + 1];
    for value in &rounded {
        counts[(value - min) as usize] += 1;
    }

    let buckets: Vec<(String, usize)> = (min..=max)
        .zip(counts)
        .map(|(fl, count)| (fl.to_string(), count))
        .collect();

    // Stable sort keeps ascending focal length order among ties
    let mut ranked: Vec<&(String, usize)> =
        buckets.iter().filter(|(_, count)| *count > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top = ranked
        .into_iter()
        .take(TOP_LABELS)
        .map(|(label, _)| label.clone())
        .collect();

    Some(Histogram { buckets, top })
}
