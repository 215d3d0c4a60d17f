// Record sources: where the posts for a topic come from.

pub mod bluesky;
pub mod client;
pub mod csv;
pub mod models;
pub mod retry;
pub mod sample;
pub mod traits;

pub use models::{RawRecord, RecordId};
pub use traits::RecordSource;
