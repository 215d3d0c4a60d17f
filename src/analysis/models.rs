// Analysis data models: scored records and the result of one query.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::records::RawRecord;
use crate::sentiment::scorer::{Label, ScoredFields};

/// A record after normalization and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub cleaned_text: String,
    #[serde(flatten)]
    pub scores: ScoredFields,
}

impl ScoredRecord {
    /// Likes plus retweets (reposts). Replies don't count.
    pub fn engagement(&self) -> u64 {
        self.record.like_count.saturating_add(self.record.retweet_count)
    }

    pub fn label(&self) -> Label {
        self.scores.sentiment_label
    }
}

/// Record count per label. All three labels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl Distribution {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }

    pub fn increment(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Negative => self.negative += 1,
            Label::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Share of records per label, in percent with one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Percentages {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }
}

/// Label counts for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub date: NaiveDate,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
}

/// Summary statistics over a scored batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub total_count: usize,
    pub average_compound: f64,
    pub median_compound: f64,
    pub distribution: Distribution,
    pub percentages: Percentages,
    /// Chronological; empty when no record carries a usable timestamp.
    pub timeline: Vec<TimelineBucket>,
}

/// Everything one topic query produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub topic: String,
    pub total_count: usize,
    pub average_compound: f64,
    pub median_compound: f64,
    pub distribution: Distribution,
    pub percentages: Percentages,
    pub timeline: Vec<TimelineBucket>,
    pub highlights: BTreeMap<Label, Vec<ScoredRecord>>,
    pub suggestions: Vec<String>,
    pub dominant_sentiment: Label,
    pub analyzed_at: DateTime<Utc>,
}
