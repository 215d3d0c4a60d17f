// Post text normalization.
//
// Social posts carry a lot of noise the lexicon can't use: links, @mentions,
// hashtag markers, emoji, digits, punctuation. `normalize` strips all of it
// and leaves lowercase ASCII words separated by single spaces. The output is
// a fixed point: normalizing it again changes nothing.
//
// The URL and mention patterns are Unicode-aware: a URL ends at any
// whitespace (including no-break spaces) and a mention swallows accented
// letters, so neither leaves fragments behind.
//
// Stopword removal is a separate, opt-in stage over the NLTK English list,
// which holds function words only. The interactive pipeline leaves it off
// because negations like "not" and "never" are stopwords and dropping them
// flips polarity; batch exports can turn it on.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use stop_words::{get, LANGUAGE};

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("URL pattern is valid"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern is valid"));

static ENGLISH_STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_string().to_lowercase())
        .collect()
});

/// Normalize optional post content. Missing content normalizes to "".
pub fn normalize(text: Option<&str>) -> String {
    text.map(normalize_str).unwrap_or_default()
}

/// Normalize a piece of post text.
///
/// Lowercases, drops URLs and @mentions entirely, drops the `#` of hashtags
/// (keeping the word), removes anything that isn't an ASCII letter or
/// whitespace, then collapses whitespace runs and trims.
pub fn normalize_str(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lower, "");
    let without_mentions = MENTION_RE.replace_all(&without_urls, "");

    // '#' falls out with the rest of the non-letters, which keeps the tag word.
    let letters: String = without_mentions
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop English stopwords from already-normalized text.
pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !is_stopword(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `word` is in the English stopword set (case-insensitive).
pub fn is_stopword(word: &str) -> bool {
    ENGLISH_STOPWORDS.contains(&word.to_lowercase())
}
