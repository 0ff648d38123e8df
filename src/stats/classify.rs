use super::ranges::RangeRule;

/// Count focal lengths per rule.
///
/// Buckets come out in rule order, including empty ones, except an empty
/// "Other" bucket which is removed. Each value lands in the first regular
/// rule that matches it, otherwise in "Other" when present, otherwise
/// nowhere. Rules producing the same label share one bucket.
pub fn classify(focal_lengths: &[f64], rules: &[RangeRule]) -> Vec<(String, usize)> {
    let mut buckets: Vec<(String, usize)> = Vec::with_capacity(rules.len());
    let slots: Vec<usize> = rules
        .iter()
        .map(|rule| {
            let label = rule.label();
            match buckets.iter().position(|(existing, _)| *existing == label) {
                Some(slot) => slot,
                None => {
                    buckets.push((label, 0));
                    buckets.len() - 1
                }
            }
        })
        .collect();

    let other_slot = rules
        .iter()
        .position(RangeRule::is_other)
        .map(|index| slots[index]);

    for &fl in focal_lengths {
        let matched = rules
            .iter()
            .zip(&slots)
            .find(|(rule, _)| !rule.is_other() && rule.matches(fl))
            .map(|(_, slot)| *slot);

        if let Some(slot) = matched.or(other_slot) {
            buckets[slot].1 += 1;
        }
    }

    if let Some(slot) = other_slot {
        if buckets[slot].1 == 0 {
            buckets.remove(slot);
        }
    }

    buckets
}
