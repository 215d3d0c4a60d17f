// Typed errors for the analysis core.
//
// Adapters and the CLI work in anyhow; the core distinguishes the failure
// kinds callers must map to different responses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Rejected before any work was done.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The source returned nothing usable for the topic.
    #[error("no records found for topic '{topic}'")]
    Empty { topic: String },

    /// The record source or the scorer failed.
    #[error("analysis failed: {0:#}")]
    Upstream(#[source] anyhow::Error),

    /// Nothing has been published yet.
    #[error("no analysis data available, run an analysis first")]
    NotFound,
}
