// Bluesky search source: live posts via the public searchPosts endpoint.
//
// Pages through `app.bsky.feed.searchPosts` with the cursor until enough
// posts are collected or the results run out. Reposts map onto the
// retweet count so engagement means the same thing for every source.

use anyhow::{Context, Result};
use async_trait::async_trait;
use atrium_api::app::bsky::feed::defs::PostView;
use atrium_api::app::bsky::feed::search_posts;
use atrium_api::types::TryFromUnknown;
use tracing::{debug, info};

use super::client::PublicAtpClient;
use super::models::{RawRecord, RecordId};
use super::retry::{with_retry, RateLimiter};
use super::traits::RecordSource;

/// Upper bound the endpoint accepts for `limit`.
const PAGE_LIMIT: usize = 100;

/// Requests per second sent to the search endpoint.
const REQUESTS_PER_SECOND: f64 = 5.0;

pub struct BlueskySearchSource {
    client: PublicAtpClient,
    limiter: RateLimiter,
}

impl BlueskySearchSource {
    pub fn new(public_api_url: &str) -> Result<Self> {
        Ok(Self {
            client: PublicAtpClient::new(public_api_url)?,
            limiter: RateLimiter::new(REQUESTS_PER_SECOND),
        })
    }

    async fn search_page(
        &self,
        topic: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> Result<search_posts::Output> {
        let limit = limit.to_string();
        let limit = limit.as_str();
        let client = &self.client;
        with_retry(&self.limiter, || async move {
            let mut params: Vec<(&str, &str)> = vec![("q", topic), ("limit", limit)];
            if let Some(c) = cursor {
                params.push(("cursor", c));
            }
            client
                .xrpc_get::<search_posts::Output>("app.bsky.feed.searchPosts", &params)
                .await
        })
        .await
        .with_context(|| format!("Failed to search posts for '{topic}'"))
    }
}

/// Convert a post view into a record. Posts whose record isn't a regular
/// feed post are skipped.
fn to_record(post: &PostView) -> Option<RawRecord> {
    let record =
        atrium_api::app::bsky::feed::post::Record::try_from_unknown(post.record.clone()).ok()?;

    Some(RawRecord {
        id: RecordId::Text(post.uri.clone()),
        timestamp: Some(record.created_at.as_ref().to_string()),
        content: record.data.text.clone(),
        username: post.author.handle.as_str().to_string(),
        like_count: post.like_count.unwrap_or(0).max(0) as u64,
        retweet_count: post.repost_count.unwrap_or(0).max(0) as u64,
        reply_count: post.reply_count.unwrap_or(0).max(0) as u64,
    })
}

#[async_trait]
impl RecordSource for BlueskySearchSource {
    async fn fetch(&self, topic: &str, max_records: usize) -> Result<Vec<RawRecord>> {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut cursor: Option<String> = None;

        while records.len() < max_records {
            let want = (max_records - records.len()).min(PAGE_LIMIT);
            let output = self.search_page(topic, want, cursor.as_deref()).await?;

            for post in &output.posts {
                if let Some(record) = to_record(post) {
                    records.push(record);
                }
                if records.len() >= max_records {
                    break;
                }
            }

            debug!(
                page_posts = output.posts.len(),
                total_collected = records.len(),
                "Fetched search page for '{}'",
                topic
            );

            cursor = output.data.cursor.clone();
            if cursor.is_none() || output.posts.is_empty() {
                break;
            }
        }

        info!(count = records.len(), topic = topic, "Collected posts from search");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "bluesky"
    }
}
