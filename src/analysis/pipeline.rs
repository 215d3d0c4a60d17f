// Analysis pipeline: fetch, normalize, score, aggregate, publish.
//
// One query runs as a single call chain. The fetch is the only async step;
// normalization, scoring and aggregation are pure and run in record order.
// The latest-analysis slot is written only after every step succeeded.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::aggregate::aggregate;
use super::error::AnalysisError;
use super::highlights::{highlights_by_label, DEFAULT_HIGHLIGHTS};
use super::models::{AnalysisResult, ScoredRecord};
use super::suggestions::{dominant_label, synthesize};
use crate::records::{RawRecord, RecordSource};
use crate::sentiment::scorer::SentimentScorer;
use crate::store::{LatestAnalysis, StoredAnalysis};
use crate::text::normalize::{normalize_str, remove_stopwords};

/// Largest `max_records` a single query may ask for.
pub const DEFAULT_MAX_RECORDS_LIMIT: usize = 10_000;

/// Tunables for one analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Drop English stopwords after normalization.
    pub remove_stopwords: bool,
    /// Highlights kept per label.
    pub highlights: usize,
    /// Upper bound on `max_records`. Larger requests are rejected before
    /// the source is asked for anything.
    pub max_records_limit: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: false,
            highlights: DEFAULT_HIGHLIGHTS,
            max_records_limit: DEFAULT_MAX_RECORDS_LIMIT,
        }
    }
}

/// Normalize and score raw records, dropping any whose text normalizes to
/// nothing. Scorer errors abort the whole batch.
pub fn score_records(
    scorer: &SentimentScorer,
    records: Vec<RawRecord>,
    remove_stop: bool,
) -> anyhow::Result<Vec<ScoredRecord>> {
    let (kept, texts): (Vec<RawRecord>, Vec<String>) = records
        .into_iter()
        .filter_map(|record| {
            let mut cleaned = normalize_str(&record.content);
            if remove_stop {
                cleaned = remove_stopwords(&cleaned);
            }
            (!cleaned.is_empty()).then_some((record, cleaned))
        })
        .unzip();

    let scores = scorer.score_batch(&texts)?;

    Ok(kept
        .into_iter()
        .zip(texts)
        .zip(scores)
        .map(|((record, cleaned_text), scores)| ScoredRecord {
            record,
            cleaned_text,
            scores,
        })
        .collect())
}

/// Runs topic queries and keeps the latest result.
pub struct Analyzer {
    source: Arc<dyn RecordSource>,
    scorer: SentimentScorer,
    options: AnalyzerOptions,
    store: LatestAnalysis,
}

impl Analyzer {
    pub fn new(
        source: Arc<dyn RecordSource>,
        scorer: SentimentScorer,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            source,
            scorer,
            options,
            store: LatestAnalysis::new(),
        }
    }

    /// Share an existing slot instead of owning a fresh one.
    pub fn with_store(mut self, store: LatestAnalysis) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &LatestAnalysis {
        &self.store
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Analyze up to `max_records` records about `topic`.
    ///
    /// On success the result and its scored batch replace the latest
    /// analysis. On any error the slot is left untouched.
    pub async fn run_analysis(
        &self,
        topic: &str,
        max_records: usize,
    ) -> Result<AnalysisResult, AnalysisError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AnalysisError::Validation("Topic is required".to_string()));
        }
        if max_records == 0 {
            return Err(AnalysisError::Validation(
                "max_records must be at least 1".to_string(),
            ));
        }
        if max_records > self.options.max_records_limit {
            return Err(AnalysisError::Validation(format!(
                "max_records must be at most {}",
                self.options.max_records_limit
            )));
        }

        info!(
            topic = topic,
            max_records = max_records,
            source = self.source.name(),
            "Starting analysis"
        );

        let raw = self
            .source
            .fetch(topic, max_records)
            .await
            .map_err(AnalysisError::Upstream)?;
        let fetched = raw.len();

        let scored = score_records(&self.scorer, raw, self.options.remove_stopwords)
            .map_err(AnalysisError::Upstream)?;

        if scored.len() < fetched {
            warn!(
                dropped = fetched - scored.len(),
                "Records with no usable text after normalization were dropped"
            );
        }

        let summary = aggregate(topic, &scored)?;
        let highlights = highlights_by_label(&scored, self.options.highlights);
        let suggestions = synthesize(topic, &summary.distribution);
        let dominant = dominant_label(&summary.distribution);

        let result = AnalysisResult {
            topic: topic.to_string(),
            total_count: summary.total_count,
            average_compound: summary.average_compound,
            median_compound: summary.median_compound,
            distribution: summary.distribution,
            percentages: summary.percentages,
            timeline: summary.timeline,
            highlights,
            suggestions,
            dominant_sentiment: dominant,
            analyzed_at: Utc::now(),
        };

        let stored = self.store.publish(result.clone(), scored).await;

        info!(
            topic = topic,
            total = result.total_count,
            dominant = %dominant,
            average = result.average_compound,
            version = stored.version,
            "Analysis complete"
        );

        Ok(result)
    }

    /// The most recent successful analysis.
    pub async fn latest(&self) -> Result<Arc<StoredAnalysis>, AnalysisError> {
        self.store.get().await.ok_or(AnalysisError::NotFound)
    }
}
