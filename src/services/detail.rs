// src/services/detail.rs

//! Submission detail page client.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{PlatformConfig, Submission};
use crate::utils::http::fetch_page;

/// Source of per-submission detail pages.
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// URL of the detail page for `submission`.
    fn detail_url(&self, submission: &Submission) -> String;

    /// Fetch the raw HTML of a detail page.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// HTTP client for submission detail pages.
pub struct DetailClient {
    client: Client,
    host: String,
}

impl DetailClient {
    pub fn new(client: Client, platform: &PlatformConfig) -> Self {
        Self {
            client,
            host: platform.host.clone(),
        }
    }
}

#[async_trait]
impl DetailSource for DetailClient {
    fn detail_url(&self, submission: &Submission) -> String {
        format!(
            "https://{}/contests/{}/submissions/{}",
            self.host, submission.contest_id, submission.id
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        fetch_page(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_url() {
        let source = DetailClient::new(Client::new(), &PlatformConfig::default());
        let submission = Submission {
            id: 5871512,
            epoch_second: 0,
            problem_id: "abc100_a".into(),
            contest_id: "abc100".into(),
            user_id: "u".into(),
            language: "Rust (1.15.1)".into(),
            point: 100.0,
            length: 1,
            result: "AC".into(),
            execution_time: Some(1),
        };
        assert_eq!(
            source.detail_url(&submission),
            "https://atcoder.jp/contests/abc100/submissions/5871512"
        );
    }
}
