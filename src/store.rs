// Latest-analysis slot: the one result kept between requests.
//
// Publishing swaps in a complete snapshot behind an Arc, so readers see
// either the previous analysis or the new one, never a mix. Versions are
// assigned under the write lock and therefore increase in publish order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::analysis::models::{AnalysisResult, ScoredRecord};

/// A published analysis together with its full scored batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub version: u64,
    pub result: AnalysisResult,
    pub records: Vec<ScoredRecord>,
}

/// Shared handle to the most recent successful analysis.
///
/// Cloning is cheap and every clone sees the same slot.
#[derive(Clone, Default)]
pub struct LatestAnalysis {
    slot: Arc<RwLock<Option<Arc<StoredAnalysis>>>>,
    version: Arc<AtomicU64>,
}

impl LatestAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored analysis. The last publisher wins.
    pub async fn publish(
        &self,
        result: AnalysisResult,
        records: Vec<ScoredRecord>,
    ) -> Arc<StoredAnalysis> {
        let mut slot = self.slot.write().await;
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Arc::new(StoredAnalysis {
            version,
            result,
            records,
        });
        *slot = Some(Arc::clone(&stored));
        debug!(version = version, topic = %stored.result.topic, "Published analysis");
        stored
    }

    /// The current analysis, if any has been published.
    pub async fn get(&self) -> Option<Arc<StoredAnalysis>> {
        self.slot.read().await.clone()
    }

    /// Version of the most recent publish, 0 before the first.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
