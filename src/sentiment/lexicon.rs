// Lexicon-and-rules polarity model.
//
// Follows the VADER approach: each known word carries a human-rated valence
// (roughly -4.0 to +4.0), nearby booster words and negations adjust it, a
// contrastive "but" shifts weight toward the second clause, and the summed
// valence is squashed into [-1, 1] for the compound score.
//
// Input is expected to be normalized text (lowercase ASCII words), so the
// capitalization and punctuation emphasis rules of the full VADER algorithm
// never fire and are not implemented.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::traits::{PolarityModel, PolarityScores};

/// Valence added by an intensifying booster ("very", "really").
const B_INCR: f64 = 0.293;
/// Valence added by a dampening booster ("slightly", "barely").
const B_DECR: f64 = -0.293;
/// Multiplier applied to a negated sentiment word.
const N_SCALAR: f64 = -0.74;
/// Approximates the max expected valence sum when normalizing to [-1, 1].
const NORMALIZATION_ALPHA: f64 = 15.0;

/// The VADER word list: one `token<TAB>mean rating` pair per line.
const VADER_LEXICON: &str = include_str!("vader_lexicon.txt");

/// Boosters scale the valence of the sentiment word that follows them.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("hella", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sorta", B_DECR),
];

/// Negation words. Apostrophes are gone after normalization, so contractions
/// appear in their collapsed form ("dont", "isnt").
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

/// VADER-style lexicon polarity model.
pub struct LexiconModel {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconModel {
    /// Build the model from the built-in tables.
    pub fn new() -> Self {
        Self {
            valences: parse_lexicon(VADER_LEXICON),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Lexicon valence of a word, if it has one.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Number of words with a valence rating.
    pub fn lexicon_size(&self) -> usize {
        self.valences.len()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    fn in_lexicon(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    /// Valence of the word at `i` after booster, negation and "least" rules.
    fn sentiment_valence(&self, words: &[&str], i: usize) -> f64 {
        let word = words[i];
        let Some(mut valence) = self.valence(word) else {
            return 0.0;
        };

        // "no" in front of another rated word acts as a negator, not a rating
        if word == "no" && words.get(i + 1).is_some_and(|next| self.in_lexicon(next)) {
            return 0.0;
        }
        if (i > 0 && words[i - 1] == "no") || (i > 1 && words[i - 2] == "no") {
            valence *= N_SCALAR;
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let prev = words[i - (start + 1)];
            if self.in_lexicon(prev) {
                continue;
            }
            let mut scalar = self.booster_scalar(prev, valence);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = self.negation_check(valence, words, start, i);
        }

        least_check(valence, words, i)
    }

    fn booster_scalar(&self, word: &str, valence: f64) -> f64 {
        match self.boosters.get(word) {
            Some(&scalar) if valence < 0.0 => -scalar,
            Some(&scalar) => scalar,
            None => 0.0,
        }
    }

    fn negation_check(&self, valence: f64, words: &[&str], start: usize, i: usize) -> f64 {
        let emphatic = |w: &str| w == "so" || w == "this";
        match start {
            0 => {
                if self.is_negation(words[i - 1]) {
                    return valence * N_SCALAR;
                }
            }
            1 => {
                if words[i - 2] == "never" && emphatic(words[i - 1]) {
                    return valence * 1.25;
                }
                if words[i - 2] == "without" && words[i - 1] == "doubt" {
                    return valence;
                }
                if self.is_negation(words[i - 2]) {
                    return valence * N_SCALAR;
                }
            }
            _ => {
                if words[i - 3] == "never" && (emphatic(words[i - 2]) || emphatic(words[i - 1])) {
                    return valence * 1.25;
                }
                if words[i - 3] == "without" && (words[i - 2] == "doubt" || words[i - 1] == "doubt")
                {
                    return valence;
                }
                if self.is_negation(words[i - 3]) {
                    return valence * N_SCALAR;
                }
            }
        }
        valence
    }
}

/// Parse `token<TAB>rating` lines. Lines without a numeric rating are skipped.
fn parse_lexicon(raw: &'static str) -> HashMap<&'static str, f64> {
    raw.lines()
        .filter_map(|line| {
            let (token, rating) = line.split_once('\t')?;
            let rating = rating.split('\t').next()?.trim().parse::<f64>().ok()?;
            Some((token, rating))
        })
        .collect()
}

/// "least good" flips polarity, but "at least" and "very least" don't.
fn least_check(valence: f64, words: &[&str], i: usize) -> f64 {
    if i == 0 || words[i - 1] != "least" {
        return valence;
    }
    if i > 1 && (words[i - 2] == "at" || words[i - 2] == "very") {
        return valence;
    }
    valence * N_SCALAR
}

/// Sentiment after "but" dominates: halve what came before, boost what follows.
fn but_check(words: &[&str], sentiments: &mut [f64]) {
    let Some(but_idx) = words.iter().position(|w| *w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but_idx {
            *sentiment *= 0.5;
        } else if idx > but_idx {
            *sentiment *= 1.5;
        }
    }
}

/// Squash an unbounded valence sum into [-1, 1].
fn normalize_score(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl PolarityModel for LexiconModel {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut sentiments = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let is_booster = self.boosters.contains_key(word);
            let kind_of = *word == "kind" && words.get(i + 1) == Some(&"of");
            if is_booster || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(&words, i));
        }

        but_check(&words, &mut sentiments);

        if sentiments.is_empty() {
            return Ok(PolarityScores::default());
        }

        let sum: f64 = sentiments.iter().sum();
        let compound = normalize_score(sum);

        // Each rated word counts for its magnitude plus one; unrated words count once.
        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        Ok(PolarityScores {
            compound: round_to(compound, 4),
            pos: round_to((pos_sum / total).abs(), 3),
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to((neu_count / total).abs(), 3),
        })
    }
}
