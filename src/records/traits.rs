// Record source trait: where raw posts come from.
//
// The analysis pipeline only needs a finite batch of RawRecords for a topic.
// Whether they came from a live search, a generator or a file is the
// source's business, as is any retry policy for its own I/O.

use anyhow::Result;
use async_trait::async_trait;

use super::models::RawRecord;

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch up to `max_records` records about `topic`.
    ///
    /// Returning zero records, or fewer than requested, is not an error.
    async fn fetch(&self, topic: &str, max_records: usize) -> Result<Vec<RawRecord>>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}
