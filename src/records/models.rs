// Record models: the fixed shape every record source must produce.
//
// Sources validate at their own boundary (serde does the work for CSV and
// JSON), so the analysis pipeline never checks for missing fields.

use serde::{Deserialize, Serialize};

/// Record identifier. Live sources use string URIs, sample and tabular
/// data usually carry numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(u64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// A single social post as delivered by a record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: RecordId,
    /// Creation time as the source reported it. Parsed lazily during
    /// timeline aggregation so one malformed value can't sink the batch.
    #[serde(default, alias = "date")]
    pub timestamp: Option<String>,
    pub content: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}
