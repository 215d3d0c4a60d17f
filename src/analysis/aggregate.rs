// Aggregation: distribution, percentages, summary statistics and timeline.
//
// Percentages are rounded per label to one decimal, half away from zero,
// and are not renormalized. Each label is off by at most 0.05, so the sum
// may drift from 100 by up to 0.15 in total. Timeline dates are taken in
// each timestamp's own offset.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use super::error::AnalysisError;
use super::models::{Aggregate, Distribution, Percentages, ScoredRecord, TimelineBucket};
use crate::sentiment::scorer::Label;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Standard median. Even counts average the two middle values.
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Percentages and compound statistics shared by live and batch runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub percentages: Percentages,
    pub average_compound: f64,
    pub median_compound: f64,
}

/// Per-label percentages of `distribution` plus mean and median of
/// `compounds`. An empty distribution gives all zeros.
pub fn summary_stats(distribution: &Distribution, compounds: &[f64]) -> SummaryStats {
    let total = distribution.total();
    let share = |label: Label| {
        if total == 0 {
            0.0
        } else {
            round1(100.0 * distribution.get(label) as f64 / total as f64)
        }
    };
    let average_compound = if compounds.is_empty() {
        0.0
    } else {
        compounds.iter().sum::<f64>() / compounds.len() as f64
    };

    SummaryStats {
        percentages: Percentages {
            positive: share(Label::Positive),
            negative: share(Label::Negative),
            neutral: share(Label::Neutral),
        },
        average_compound,
        median_compound: median(compounds),
    }
}

/// Parse a source timestamp into its calendar date.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]+HH:MM`, naive date-times with
/// a space or `T` separator, and bare dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Per-label counts per date, in ascending date order.
///
/// Records without a usable timestamp are left out and reported once as a
/// warning.
pub fn build_timeline(records: &[ScoredRecord]) -> Vec<TimelineBucket> {
    let mut by_date: BTreeMap<NaiveDate, Distribution> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        match record.record.timestamp.as_deref().and_then(parse_date) {
            Some(date) => by_date.entry(date).or_default().increment(record.label()),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            skipped = skipped,
            total = records.len(),
            "Timeline degraded: records without a usable timestamp were left out"
        );
    }

    by_date
        .into_iter()
        .map(|(date, counts)| TimelineBucket {
            date,
            positive_count: counts.positive,
            negative_count: counts.negative,
            neutral_count: counts.neutral,
        })
        .collect()
}

/// Summarize a scored batch. An empty batch is an error.
pub fn aggregate(topic: &str, records: &[ScoredRecord]) -> Result<Aggregate, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::Empty {
            topic: topic.to_string(),
        });
    }

    let mut distribution = Distribution::default();
    for record in records {
        distribution.increment(record.label());
    }

    let compounds: Vec<f64> = records.iter().map(|r| r.scores.compound).collect();
    let stats = summary_stats(&distribution, &compounds);

    Ok(Aggregate {
        total_count: records.len(),
        average_compound: stats.average_compound,
        median_compound: stats.median_compound,
        distribution,
        percentages: stats.percentages,
        timeline: build_timeline(records),
    })
}
