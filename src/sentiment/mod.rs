// Sentiment scoring: trait-based abstraction for swappable polarity models.
//
// The PolarityModel trait defines the interface. LexiconModel implements it
// with a valence dictionary and a handful of VADER-style rules. A learned
// model could be dropped in later without touching aggregation.

pub mod lexicon;
pub mod scorer;
pub mod traits;
