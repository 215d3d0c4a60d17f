// Composition tests: the analysis pipeline end to end.
//
// Record sources and polarity models are replaced with in-memory stubs so
// every scenario is deterministic and offline:
//   RecordSource -> normalize -> score -> aggregate/highlights -> publish

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sentiscope::analysis::highlights::top_n;
use sentiscope::analysis::models::Distribution;
use sentiscope::analysis::suggestions::{pool, synthesize_with_rng};
use sentiscope::analysis::{AnalysisError, Analyzer, AnalyzerOptions};
use sentiscope::records::sample::SampleSource;
use sentiscope::records::{RawRecord, RecordId, RecordSource};
use sentiscope::sentiment::scorer::{Label, SentimentScorer};
use sentiscope::sentiment::traits::{PolarityModel, PolarityScores};
use sentiscope::store::LatestAnalysis;

// ============================================================
// Stubs
// ============================================================

/// Returns a fixed batch regardless of topic.
struct FixedSource(Vec<RawRecord>);

#[async_trait]
impl RecordSource for FixedSource {
    async fn fetch(&self, _topic: &str, max_records: usize) -> Result<Vec<RawRecord>> {
        Ok(self.0.iter().take(max_records).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct FailingSource;

#[async_trait]
impl RecordSource for FailingSource {
    async fn fetch(&self, _topic: &str, _max_records: usize) -> Result<Vec<RawRecord>> {
        anyhow::bail!("search endpoint unreachable")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Looks up the compound score by cleaned text.
struct TableModel(HashMap<String, f64>);

impl PolarityModel for TableModel {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        let compound = self.0.get(text).copied().unwrap_or(0.0);
        Ok(PolarityScores {
            compound,
            pos: compound.max(0.0),
            neg: (-compound).max(0.0),
            neu: 1.0 - compound.abs(),
        })
    }
}

struct BrokenModel;

impl PolarityModel for BrokenModel {
    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores> {
        anyhow::bail!("polarity model crashed")
    }
}

/// Encode a number with letters only, so it survives normalization.
fn alpha(mut n: usize) -> String {
    let mut out = String::new();
    loop {
        out.insert(0, (b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            return out;
        }
    }
}

fn raw(id: u64, content: &str, likes: u64, timestamp: Option<&str>) -> RawRecord {
    RawRecord {
        id: RecordId::Int(id),
        timestamp: timestamp.map(str::to_string),
        content: content.to_string(),
        username: format!("user{id}"),
        like_count: likes,
        retweet_count: 0,
        reply_count: 0,
    }
}

fn analyzer_with(source: impl RecordSource + 'static) -> Analyzer {
    Analyzer::new(
        Arc::new(source),
        SentimentScorer::default(),
        AnalyzerOptions::default(),
    )
}

// ============================================================
// Scenarios
// ============================================================

#[tokio::test]
async fn uniform_compounds_over_one_hundred_records() {
    let mut table = HashMap::new();
    let mut records = Vec::new();
    let mut compounds = Vec::new();
    for i in 0..100 {
        let text = format!("post {}", alpha(i));
        let compound = -1.0 + 2.0 * i as f64 / 99.0;
        table.insert(text.clone(), compound);
        compounds.push(compound);
        records.push(raw(i as u64, &text, 0, None));
    }

    let analyzer = Analyzer::new(
        Arc::new(FixedSource(records)),
        SentimentScorer::new(Box::new(TableModel(table))),
        AnalyzerOptions::default(),
    );
    let result = analyzer.run_analysis("AI", 100).await.unwrap();

    assert_eq!(result.total_count, 100);
    assert_eq!(result.distribution.total(), 100);
    let true_mean = compounds.iter().sum::<f64>() / 100.0;
    assert!((result.average_compound - true_mean).abs() < 1e-9);
    assert!(result.timeline.is_empty());

    let sum = result.percentages.positive + result.percentages.negative + result.percentages.neutral;
    assert!((sum - 100.0).abs() <= 0.3);
    for label in Label::ALL {
        let pct = result.percentages.get(label);
        assert!((0.0..=100.0).contains(&pct));
    }
}

#[tokio::test]
async fn empty_batch_is_error_and_leaves_latest_unchanged() {
    let store = LatestAnalysis::new();

    let ok = analyzer_with(FixedSource(vec![raw(1, "I love this", 3, None)]))
        .with_store(store.clone());
    ok.run_analysis("AI", 10).await.unwrap();
    let before = store.get().await.unwrap();

    let empty = analyzer_with(FixedSource(Vec::new())).with_store(store.clone());
    let err = empty.run_analysis("AI", 10).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Empty { .. }));

    let after = store.get().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(store.version(), 1);
}

#[tokio::test]
async fn records_that_normalize_to_nothing_count_as_empty() {
    let analyzer = analyzer_with(FixedSource(vec![
        raw(1, "https://example.com @someone", 0, None),
        raw(2, "1234 !!! 🚀", 0, None),
    ]));
    let err = analyzer.run_analysis("AI", 10).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Empty { .. }));
}

#[tokio::test]
async fn validation_rejects_blank_topic_and_zero_records() {
    let analyzer = analyzer_with(FixedSource(vec![raw(1, "good", 0, None)]));
    assert!(matches!(
        analyzer.run_analysis("   ", 10).await,
        Err(AnalysisError::Validation(_))
    ));
    assert!(matches!(
        analyzer.run_analysis("AI", 0).await,
        Err(AnalysisError::Validation(_))
    ));
    assert!(matches!(analyzer.latest().await, Err(AnalysisError::NotFound)));
}

#[tokio::test]
async fn oversized_record_request_is_rejected_before_fetch() {
    let analyzer = analyzer_with(SampleSource::seeded(1));
    let err = analyzer
        .run_analysis("AI", 10_000_000_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(_)));
    assert!(err.to_string().contains("at most"));

    let capped = Analyzer::new(
        Arc::new(SampleSource::seeded(1)),
        SentimentScorer::default(),
        AnalyzerOptions {
            max_records_limit: 25,
            ..AnalyzerOptions::default()
        },
    );
    assert_eq!(capped.run_analysis("AI", 25).await.unwrap().total_count, 25);
    assert!(matches!(
        capped.run_analysis("AI", 26).await,
        Err(AnalysisError::Validation(_))
    ));
}

#[tokio::test]
async fn scorer_failure_is_upstream_and_leaves_latest_unchanged() {
    let store = LatestAnalysis::new();

    let ok = analyzer_with(FixedSource(vec![raw(1, "I love this", 3, None)]))
        .with_store(store.clone());
    ok.run_analysis("AI", 10).await.unwrap();
    let before = store.get().await.unwrap();

    let broken = Analyzer::new(
        Arc::new(FixedSource(vec![raw(2, "This is terrible", 1, None)])),
        SentimentScorer::new(Box::new(BrokenModel)),
        AnalyzerOptions::default(),
    )
    .with_store(store.clone());
    let err = broken.run_analysis("AI", 10).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Upstream(_)));
    assert!(err.to_string().contains("polarity model crashed"));

    let after = store.get().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(store.version(), 1);
}

#[tokio::test]
async fn source_failure_is_upstream_and_not_published() {
    let analyzer = analyzer_with(FailingSource);
    let err = analyzer.run_analysis("AI", 10).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Upstream(_)));
    assert!(err.to_string().contains("unreachable"));
    assert!(analyzer.latest().await.is_err());
}

#[tokio::test]
async fn successful_run_publishes_result_and_scored_batch() {
    let analyzer = analyzer_with(FixedSource(vec![
        raw(1, "I love this, it is wonderful", 40, Some("2024-05-02T10:00:00Z")),
        raw(2, "This is terrible and awful", 5, Some("2024-05-01T10:00:00Z")),
        raw(3, "The report was published today", 1, Some("2024-05-01 12:00:00")),
    ]));

    let result = analyzer.run_analysis("  AI  ", 10).await.unwrap();
    assert_eq!(result.topic, "AI");
    assert_eq!(result.distribution.positive, 1);
    assert_eq!(result.distribution.negative, 1);
    assert_eq!(result.distribution.neutral, 1);
    assert_eq!(result.timeline.len(), 2);
    assert_eq!(result.timeline[0].date.to_string(), "2024-05-01");
    assert_eq!(result.timeline[0].negative_count + result.timeline[0].neutral_count, 2);
    assert_eq!(result.highlights[&Label::Positive].len(), 1);
    assert_eq!(result.suggestions.len(), 5);

    let stored = analyzer.latest().await.unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.records.len(), 3);
    assert_eq!(stored.result, result);
}

#[tokio::test]
async fn later_publish_replaces_earlier_one() {
    let analyzer = analyzer_with(SampleSource::seeded(11));
    analyzer.run_analysis("Climate Change", 20).await.unwrap();
    analyzer.run_analysis("Remote Work", 30).await.unwrap();

    let stored = analyzer.latest().await.unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.result.topic, "Remote Work");
    assert_eq!(stored.records.len(), stored.result.total_count);
}

#[tokio::test]
async fn sample_source_feeds_a_balanced_looking_analysis() {
    let analyzer = analyzer_with(SampleSource::seeded(5));
    let result = analyzer.run_analysis("Electric Vehicles", 200).await.unwrap();
    assert_eq!(result.total_count, 200);
    assert!(result.distribution.positive > 0);
    assert!(result.distribution.negative > 0);
    assert!(!result.timeline.is_empty());
    let bucketed: usize = result
        .timeline
        .iter()
        .map(|b| b.positive_count + b.negative_count + b.neutral_count)
        .sum();
    assert_eq!(bucketed, 200);
}

// ============================================================
// Highlights and suggestions
// ============================================================

#[test]
fn highlight_order_prefers_engagement_then_input_order() {
    let scorer = SentimentScorer::default();
    let records = sentiscope::analysis::pipeline::score_records(
        &scorer,
        vec![
            raw(1, "love it", 10, None),
            raw(2, "love it", 30, None),
            raw(3, "love it", 30, None),
            raw(4, "love it", 5, None),
        ],
        false,
    )
    .unwrap();

    let ids: Vec<_> = top_n(&records, Label::Positive, 3)
        .iter()
        .map(|r| r.record.id.clone())
        .collect();
    assert_eq!(ids, vec![RecordId::Int(2), RecordId::Int(3), RecordId::Int(1)]);
}

#[test]
fn suggestions_mix_two_positive_two_negative_one_neutral() {
    let distribution = Distribution {
        positive: 80,
        negative: 10,
        neutral: 10,
    };
    for seed in 0..20 {
        let picks = synthesize_with_rng("AI", &distribution, &mut StdRng::seed_from_u64(seed));
        assert_eq!(picks.len(), 5);
        assert_eq!(picks.iter().collect::<HashSet<_>>().len(), 5);

        for (label, expected) in [(Label::Positive, 2), (Label::Negative, 2), (Label::Neutral, 1)] {
            let members: HashSet<String> = pool(label, "AI").into_iter().collect();
            let got = picks.iter().filter(|s| members.contains(*s)).count();
            assert_eq!(got, expected, "seed {seed}, label {label}");
        }
    }
}
