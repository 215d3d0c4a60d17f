// Sample record generator.
//
// Produces plausible posts about any topic from fixed templates, with
// random authors, engagement counts and creation dates spread over the last
// 30 days. Used for demos and whenever no live source is configured.
// Passing a seed makes every fetch return the same batch.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::models::{RawRecord, RecordId};
use super::traits::RecordSource;

/// First id handed out to generated records.
const BASE_ID: u64 = 1_000_000_000_000_000_000;

/// How far back generated creation dates reach.
const MAX_DAYS_AGO: i64 = 30;

const POSITIVE_TEMPLATES: &[&str] = &[
    "Great news about {topic}! This is exactly what we needed 🎉",
    "Love seeing the progress with {topic}! Very exciting times ahead",
    "Inspiring developments in {topic} - feeling hopeful about the future!",
    "The innovation in {topic} is breaking records this year! Amazing! 🚀",
    "Really impressed with the latest {topic} updates. This is game-changing!",
    "{topic} is becoming more accessible. Great step forward! ⚡",
    "The positive impact of {topic} is showing real results globally",
    "Communities embracing {topic} - truly inspiring to see! 💪",
    "Fantastic to see {topic} getting the attention it deserves! 👏",
    "The future of {topic} looks incredibly bright! Excited! ✨",
];

const NEGATIVE_TEMPLATES: &[&str] = &[
    "Another setback for {topic}. When will we see real progress? 😔",
    "Disappointed by the lack of action on {topic}. We need change now!",
    "Frustrated by the slow progress with {topic}. Time is running out! ⏰",
    "The problems with {topic} keep getting worse. This is troubling.",
    "Disappointed in the lack of commitment from leaders on {topic} 😠",
    "Still seeing major issues with {topic}. This is terrifying honestly.",
    "Companies prioritizing profits over {topic}. So infuriating!",
    "The misinformation about {topic} is spreading. Very frustrating!",
    "Another controversy surrounding {topic}. When will this end? 😤",
    "The challenges with {topic} are overwhelming. Need solutions ASAP!",
];

const NEUTRAL_TEMPLATES: &[&str] = &[
    "New {topic} report released. Data shows mixed results and trends.",
    "Conference on {topic} scheduled for next month. Key discussions planned.",
    "{topic} affects multiple sectors including economy and infrastructure.",
    "Researchers studying the long-term impact of {topic} on society.",
    "New policies regarding {topic} being discussed at various levels.",
    "Latest technology for monitoring {topic} has been introduced recently.",
    "Educational program about {topic} launched in institutions nationwide.",
    "Study examines the relationship between {topic} and market trends.",
    "Experts analyzing {topic} data. Results expected in coming months.",
    "Report on {topic} published. Contains comprehensive analysis and stats.",
];

/// Template-based record generator.
#[derive(Debug, Clone, Default)]
pub struct SampleSource {
    seed: Option<u64>,
}

impl SampleSource {
    /// A generator that produces a fresh random batch on every fetch.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// A generator that produces the same batch for the same arguments.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Generate `count` records about `topic` with the given RNG.
    pub fn generate<R: Rng + ?Sized>(topic: &str, count: usize, rng: &mut R) -> Vec<RawRecord> {
        let now = Utc::now();
        let templates: Vec<&str> = POSITIVE_TEMPLATES
            .iter()
            .chain(NEGATIVE_TEMPLATES)
            .chain(NEUTRAL_TEMPLATES)
            .copied()
            .collect();

        (0..count)
            .map(|i| {
                let template = templates.choose(rng).copied().unwrap_or_default();
                let days_ago = rng.random_range(0..=MAX_DAYS_AGO);
                RawRecord {
                    id: RecordId::Int(BASE_ID + i as u64),
                    timestamp: Some((now - Duration::days(days_ago)).to_rfc3339()),
                    content: template.replace("{topic}", topic),
                    username: format!("user{}", rng.random_range(100..10_000)),
                    like_count: rng.random_range(0..=1000),
                    retweet_count: rng.random_range(0..=500),
                    reply_count: rng.random_range(0..=100),
                }
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for SampleSource {
    async fn fetch(&self, topic: &str, max_records: usize) -> Result<Vec<RawRecord>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let records = Self::generate(topic, max_records, &mut rng);
        info!(count = records.len(), topic = topic, "Generated sample records");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "sample"
    }
}
