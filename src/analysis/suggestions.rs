// Suggestion synthesis: follow-up reading ideas for a topic.
//
// Always a mix: two ideas from the positive pool, two from the negative
// pool and one neutral, shuffled. The dominant label is reported alongside
// but doesn't change the mix.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::debug;

use super::models::Distribution;
use crate::sentiment::scorer::Label;

/// Number of suggestions returned.
pub const SUGGESTION_COUNT: usize = 5;

const POSITIVE_POOL: [&str; 5] = [
    "Explore success stories about {topic}",
    "Learn best practices in {topic}",
    "Join communities discussing {topic}",
    "Discover innovations in {topic}",
    "Follow thought leaders in {topic}",
];

const NEGATIVE_POOL: [&str; 5] = [
    "Understand challenges in {topic}",
    "Research solutions for {topic} issues",
    "Read critical analysis of {topic}",
    "Explore alternative approaches to {topic}",
    "Stay informed about {topic} controversies",
];

const NEUTRAL_POOL: [&str; 5] = [
    "Get comprehensive overview of {topic}",
    "Compare different perspectives on {topic}",
    "Read factual information about {topic}",
    "Study the evolution of {topic}",
    "Analyze trends in {topic}",
];

/// The suggestion pool for `label`, filled in with `topic`.
pub fn pool(label: Label, topic: &str) -> Vec<String> {
    let templates = match label {
        Label::Positive => &POSITIVE_POOL,
        Label::Negative => &NEGATIVE_POOL,
        Label::Neutral => &NEUTRAL_POOL,
    };
    templates.iter().map(|t| t.replace("{topic}", topic)).collect()
}

/// How many suggestions each pool contributes.
fn quota(label: Label) -> usize {
    match label {
        Label::Positive | Label::Negative => 2,
        Label::Neutral => 1,
    }
}

/// The most frequent label. Ties go to positive, then negative, then neutral.
pub fn dominant_label(distribution: &Distribution) -> Label {
    let mut best = Label::Positive;
    for label in Label::ALL {
        if distribution.get(label) > distribution.get(best) {
            best = label;
        }
    }
    best
}

/// Pick suggestions with the given RNG.
pub fn synthesize_with_rng<R: Rng + ?Sized>(
    topic: &str,
    distribution: &Distribution,
    rng: &mut R,
) -> Vec<String> {
    debug!(
        dominant = %dominant_label(distribution),
        topic = topic,
        "Synthesizing suggestions"
    );

    let mut picks: Vec<String> = Label::ALL
        .into_iter()
        .flat_map(|label| {
            pool(label, topic)
                .choose_multiple(rng, quota(label))
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect();

    picks.shuffle(rng);
    picks.truncate(SUGGESTION_COUNT);
    picks
}

/// Pick suggestions with the thread-local RNG.
pub fn synthesize(topic: &str, distribution: &Distribution) -> Vec<String> {
    synthesize_with_rng(topic, distribution, &mut rand::rng())
}
