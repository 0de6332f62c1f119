//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::expand_tilde;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where and as whom submissions are archived
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// HTTP and request pacing settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Judge endpoints and page layout
    #[serde(default)]
    pub platform: PlatformConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Write the default configuration to `path` unless a file already exists.
    ///
    /// Returns `true` when a new file was created.
    pub fn write_default(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&Self::default())?;
        fs::write(path, content)?;
        Ok(true)
    }

    /// Archive root with `~` expanded.
    pub fn repository_path(&self) -> PathBuf {
        expand_tilde(&self.archive.repository_path)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.archive.repository_path.as_os_str().is_empty() {
            return Err(AppError::validation("archive.repository_path is empty"));
        }
        if self.archive.user_id.trim().is_empty() {
            return Err(AppError::validation("archive.user_id is empty"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.platform.host.trim().is_empty() {
            return Err(AppError::validation("platform.host is empty"));
        }
        if self.platform.accepted_result.is_empty() {
            return Err(AppError::validation("platform.accepted_result is empty"));
        }
        let selector = self.platform.code_selector();
        scraper::Selector::parse(selector)
            .map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        Ok(())
    }
}

/// Archive destination and commit identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Archive root; may start with `~`
    #[serde(default)]
    pub repository_path: PathBuf,

    /// AtCoder user whose submissions are archived
    #[serde(default)]
    pub user_id: String,

    /// Commit author email (only used when the archive is a git repository)
    #[serde(default)]
    pub user_email: String,
}

/// HTTP client and request pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Minimum gap between the starts of two detail page requests
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Revision of the judge's feed and detail page contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVersion {
    /// v3 user submissions API, `#submission-code` detail pages
    #[default]
    Current,
    /// `results` API, `.linenums` detail pages
    Legacy,
}

impl PlatformVersion {
    /// Feed base URL for this revision.
    pub fn feed_url(&self) -> &'static str {
        match self {
            PlatformVersion::Current => {
                "https://kenkoooo.com/atcoder/atcoder-api/v3/user/submissions"
            }
            PlatformVersion::Legacy => "https://kenkoooo.com/atcoder/atcoder-api/results",
        }
    }

    /// CSS selector for the code block on detail pages.
    pub fn code_selector(&self) -> &'static str {
        match self {
            PlatformVersion::Current => "#submission-code",
            PlatformVersion::Legacy => ".linenums",
        }
    }
}

/// Judge endpoints and page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub version: PlatformVersion,

    /// Judge host; also the top-level directory of the archive
    #[serde(default = "defaults::host")]
    pub host: String,

    /// Verdict code counted as accepted
    #[serde(default = "defaults::accepted_result")]
    pub accepted_result: String,

    /// Override for the version's code selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_selector: Option<String>,

    /// Override for the version's feed base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
}

impl PlatformConfig {
    pub fn code_selector(&self) -> &str {
        self.code_selector
            .as_deref()
            .unwrap_or_else(|| self.version.code_selector())
    }

    pub fn feed_url(&self) -> &str {
        self.feed_url
            .as_deref()
            .unwrap_or_else(|| self.version.feed_url())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            version: PlatformVersion::default(),
            host: defaults::host(),
            accepted_result: defaults::accepted_result(),
            code_selector: None,
            feed_url: None,
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; procon-gardener/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        1500
    }

    // Platform defaults
    pub fn host() -> String {
        "atcoder.jp".into()
    }
    pub fn accepted_result() -> String {
        "AC".into()
    }
}
