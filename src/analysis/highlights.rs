// Highlight selection: most-engaged records per sentiment label.

use std::collections::BTreeMap;

use super::models::ScoredRecord;
use crate::sentiment::scorer::Label;

/// Highlights kept per label unless configured otherwise.
pub const DEFAULT_HIGHLIGHTS: usize = 5;

/// Up to `n` records with `label`, most engaged first.
///
/// The sort is stable, so records with equal engagement keep their input
/// order.
pub fn top_n(records: &[ScoredRecord], label: Label, n: usize) -> Vec<&ScoredRecord> {
    let mut matching: Vec<&ScoredRecord> = records.iter().filter(|r| r.label() == label).collect();
    matching.sort_by_key(|r| std::cmp::Reverse(r.engagement()));
    matching.truncate(n);
    matching
}

/// Top records for every label. Labels with no records map to an empty list.
pub fn highlights_by_label(
    records: &[ScoredRecord],
    n: usize,
) -> BTreeMap<Label, Vec<ScoredRecord>> {
    Label::ALL
        .into_iter()
        .map(|label| {
            let top = top_n(records, label, n).into_iter().cloned().collect();
            (label, top)
        })
        .collect()
}
