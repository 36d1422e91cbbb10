//! Publisher configuration
//!
//! Read once at process start:
//! - `BLOG_GITHUB_TOKEN` - API token. Required to publish.
//! - `BLOG_REPO_OWNER` - Optional. Defaults to `queryplanner`.
//! - `BLOG_REPO_NAME` - Optional. Defaults to `blogs`.
//! - `BLOG_CONTENT_PATH` - Optional. Directory for posts. Defaults to `src/data/blog`.
//! - `BLOG_GITHUB_API_URL` - Optional. Defaults to `https://api.github.com`.
//! - `BLOG_HTTP_TIMEOUT_SECS` - Optional. Per-request timeout. Defaults to `30`.
//! - `BLOG_SESSION_DIR` - Optional. Where the CLI keeps session state.

use crate::error::{Error, Result};
use crate::types::RepoRef;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the API token
pub const TOKEN_VAR: &str = "BLOG_GITHUB_TOKEN";

/// Default repository owner
pub const DEFAULT_OWNER: &str = "queryplanner";
/// Default repository name
pub const DEFAULT_REPO: &str = "blogs";
/// Default directory for posts inside the repository
pub const DEFAULT_CONTENT_PATH: &str = "src/data/blog";
/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the publisher needs to reach the repository
#[derive(Clone)]
pub struct PublisherConfig {
    /// API token; `None` until configured
    pub token: Option<String>,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Directory for posts, without trailing slash
    pub content_path: String,
    /// REST API base URL
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Session directory override for the CLI
    pub session_dir: Option<PathBuf>,
}

impl std::fmt::Debug for PublisherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("content_path", &self.content_path)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("session_dir", &self.session_dir)
            .finish()
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            content_path: DEFAULT_CONTENT_PATH.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_dir: None,
        }
    }
}

impl PublisherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_url = get("BLOG_GITHUB_API_URL").unwrap_or(defaults.api_url);
        Url::parse(&api_url)
            .map_err(|e| Error::Config(format!("invalid BLOG_GITHUB_API_URL '{api_url}': {e}")))?;

        let timeout = match get("BLOG_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| {
                        Error::Config(format!("invalid BLOG_HTTP_TIMEOUT_SECS '{raw}'"))
                    })?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            token: get(TOKEN_VAR),
            owner: get("BLOG_REPO_OWNER").unwrap_or(defaults.owner),
            repo: get("BLOG_REPO_NAME").unwrap_or(defaults.repo),
            content_path: get("BLOG_CONTENT_PATH")
                .map_or(defaults.content_path, |p| p.trim_end_matches('/').to_string()),
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
            session_dir: get("BLOG_SESSION_DIR").map(PathBuf::from),
        })
    }

    /// Repository to publish to, applying per-request overrides
    pub fn repo_ref(&self, owner: Option<&str>, name: Option<&str>) -> RepoRef {
        RepoRef::new(
            owner.unwrap_or(&self.owner),
            name.unwrap_or(&self.repo),
        )
    }

    /// Repository path for a post file
    pub fn file_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.content_path)
    }

    /// Directory for the CLI session store
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("blog-pipeline")
                .join("session")
        })
    }
}
