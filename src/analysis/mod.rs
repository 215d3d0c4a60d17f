// Analysis core: aggregation, highlights, suggestions and the pipeline
// that ties them to a record source.

pub mod aggregate;
pub mod error;
pub mod highlights;
pub mod models;
pub mod pipeline;
pub mod suggestions;

pub use error::AnalysisError;
pub use models::{AnalysisResult, ScoredRecord};
pub use pipeline::{Analyzer, AnalyzerOptions};
