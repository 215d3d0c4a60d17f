// Sentiment scorer: polarity model output plus the three-way label.
//
// The label is a pure function of the compound score. The thresholds are
// inclusive on the polar side: exactly 0.05 is positive, exactly -0.05 is
// negative, anything strictly between is neutral.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::lexicon::LexiconModel;
use super::traits::{PolarityModel, PolarityScores};

/// Compound score at or above which text is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Three-way sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// All labels in their canonical order. This order is also the
    /// tie-break order wherever a single label must be picked.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    /// Classify a compound score.
    pub fn from_compound(compound: f64) -> Self {
        match compound {
            c if c >= POSITIVE_THRESHOLD => Label::Positive,
            c if c <= NEGATIVE_THRESHOLD => Label::Negative,
            _ => Label::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            other => anyhow::bail!("Unknown sentiment label: {other}"),
        }
    }
}

/// Scores attached to one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredFields {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub sentiment_label: Label,
}

/// Applies a polarity model and the classification rule.
///
/// Stateless: holds only the model, which is itself required to be pure.
pub struct SentimentScorer {
    model: Box<dyn PolarityModel>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Box::new(LexiconModel::new()))
    }
}

impl SentimentScorer {
    pub fn new(model: Box<dyn PolarityModel>) -> Self {
        Self { model }
    }

    /// Score normalized text. Model errors propagate unchanged.
    pub fn score(&self, cleaned_text: &str) -> Result<ScoredFields> {
        self.model.polarity_scores(cleaned_text).map(ScoredFields::from)
    }

    /// Score many normalized texts, in order. The first model error aborts
    /// the batch.
    pub fn score_batch(&self, cleaned_texts: &[String]) -> Result<Vec<ScoredFields>> {
        let raw = self.model.polarity_batch(cleaned_texts)?;
        Ok(raw.into_iter().map(ScoredFields::from).collect())
    }
}

impl From<PolarityScores> for ScoredFields {
    fn from(raw: PolarityScores) -> Self {
        Self {
            compound: raw.compound,
            positive: raw.pos,
            negative: raw.neg,
            neutral: raw.neu,
            sentiment_label: Label::from_compound(raw.compound),
        }
    }
}
