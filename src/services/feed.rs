// src/services/feed.rs

//! Submission feed client.
//!
//! Fetches a user's whole submission history from the feed endpoint in a
//! single request. Any failure here is fatal to the run.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{PlatformConfig, PlatformVersion, Submission};
use crate::utils::http::fetch_text;

/// Source of a user's submission history.
#[async_trait]
pub trait SubmissionFeed: Send + Sync {
    /// Fetch every submission made by `user_id`.
    async fn fetch_submissions(&self, user_id: &str) -> Result<Vec<Submission>>;
}

/// HTTP client for the submission feed.
pub struct FeedClient {
    client: Client,
    base_url: String,
    version: PlatformVersion,
}

impl FeedClient {
    /// Create a feed client for the configured platform.
    pub fn new(client: Client, platform: &PlatformConfig) -> Self {
        Self {
            client,
            base_url: platform.feed_url().to_string(),
            version: platform.version,
        }
    }

    /// Build the request URL for `user_id`.
    pub fn feed_url(&self, user_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("user", user_id);
            if self.version == PlatformVersion::Current {
                query.append_pair("from_second", "0");
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SubmissionFeed for FeedClient {
    async fn fetch_submissions(&self, user_id: &str) -> Result<Vec<Submission>> {
        let url = self.feed_url(user_id).map_err(AppError::feed)?;
        log::info!("Requesting submission feed: {}", url);

        let body = fetch_text(&self.client, url.as_str())
            .await
            .map_err(AppError::feed)?;
        parse_feed(&body)
    }
}

/// Parse a feed response body into submissions.
pub fn parse_feed(body: &str) -> Result<Vec<Submission>> {
    serde_json::from_str(body).map_err(|e| AppError::feed(format!("malformed feed body: {e}")))
}
