// CSV record source: posts loaded from a local export.
//
// The file needs at least `id` and `content` columns; `date`/`timestamp`,
// `username` and the engagement counts are optional. Rows are kept when
// their content mentions the topic, ignoring case. The file is re-read on
// every fetch so edits show up without a restart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::models::RawRecord;
use super::traits::RecordSource;

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read matching rows from `path`, stopping after `max_records` matches.
pub fn read_matching(path: &Path, topic: &str, max_records: usize) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let needle = topic.to_lowercase();
    let mut records = Vec::new();

    for (i, row) in reader.deserialize::<RawRecord>().enumerate() {
        if records.len() >= max_records {
            break;
        }
        let record =
            row.with_context(|| format!("Invalid record on line {} of {}", i + 2, path.display()))?;
        if needle.is_empty() || record.content.to_lowercase().contains(&needle) {
            records.push(record);
        }
    }

    Ok(records)
}

#[async_trait]
impl RecordSource for CsvSource {
    async fn fetch(&self, topic: &str, max_records: usize) -> Result<Vec<RawRecord>> {
        let path = self.path.clone();
        let query = topic.to_string();
        let records =
            tokio::task::spawn_blocking(move || read_matching(&path, &query, max_records))
                .await
                .context("CSV reader task failed")??;

        info!(
            count = records.len(),
            topic = topic,
            path = %self.path.display(),
            "Loaded records from CSV"
        );
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_filters_by_topic_case_insensitively() {
        let file = write_csv(
            "id,date,content,username,like_count,retweet_count\n\
             1,2024-05-01,Bitcoin is soaring,alice,5,1\n\
             2,2024-05-02,Nothing to see,bob,0,0\n\
             3,2024-05-03,bitcoin fees hurt,carol,2,2\n",
        );
        let source = CsvSource::new(file.path());
        let records = source.fetch("BITCOIN", 10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].username, "alice");
        assert_eq!(records[1].like_count, 2);
    }

    #[tokio::test]
    async fn test_respects_max_records() {
        let file = write_csv("id,content\n1,ai one\n2,ai two\n3,ai three\n");
        let records = CsvSource::new(file.path()).fetch("ai", 2).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = CsvSource::new("/nonexistent/posts.csv");
        assert!(source.fetch("ai", 10).await.is_err());
    }
}
