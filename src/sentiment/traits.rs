// Polarity model trait: the swap-ready abstraction.
//
// A polarity model turns a piece of normalized text into four numbers: a
// compound score in [-1, 1] and the positive/negative/neutral proportions.
// Everything downstream (classification, aggregation, highlights) only sees
// those four numbers.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Raw output of a polarity model for one text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Overall polarity from -1.0 (most negative) to 1.0 (most positive)
    pub compound: f64,
    /// Share of the text carrying positive sentiment (0.0 to 1.0)
    pub pos: f64,
    /// Share of the text carrying negative sentiment (0.0 to 1.0)
    pub neg: f64,
    /// Share of the text that is sentiment-neutral (0.0 to 1.0)
    pub neu: f64,
}

/// Trait for scoring text polarity. Implementations must be pure: the same
/// text always yields the same scores, with no I/O and no hidden state.
pub trait PolarityModel: Send + Sync {
    /// Score a single normalized text.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;

    /// Score multiple texts, returning results in the same order.
    /// Default implementation calls polarity_scores sequentially.
    fn polarity_batch(&self, texts: &[String]) -> Result<Vec<PolarityScores>> {
        texts.iter().map(|t| self.polarity_scores(t)).collect()
    }
}
