//! Request and response bodies for the REST endpoints

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}` (fields we use)
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    /// Primary branch
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// `GET /git/ref/heads/{branch}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Object the ref points at
    #[serde(default)]
    pub object: Option<RefObject>,
}

/// Target of a git ref
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    /// Commit SHA
    #[serde(default)]
    pub sha: Option<String>,
}

impl GitRef {
    /// Commit SHA, if present and non-empty
    pub fn sha(&self) -> Option<&str> {
        self.object
            .as_ref()
            .and_then(|o| o.sha.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// `GET /contents/{path}` for a file
#[derive(Debug, Clone, Deserialize)]
pub struct ContentInfo {
    /// Blob SHA required to update the file
    #[serde(default)]
    pub sha: Option<String>,
}

/// A pull request, as returned by create and list
#[derive(Debug, Clone, Deserialize)]
pub struct PullInfo {
    /// Web URL
    #[serde(default)]
    pub html_url: Option<String>,
}

/// `POST /git/refs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRefPayload {
    /// Full ref name (`refs/heads/...`)
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit to point at
    pub sha: String,
}

impl CreateRefPayload {
    /// Branch ref pointing at `sha`
    pub fn branch(branch: &str, sha: &str) -> Self {
        Self {
            ref_name: format!("refs/heads/{branch}"),
            sha: sha.to_string(),
        }
    }
}

/// `PUT /contents/{path}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutContentsPayload {
    /// Commit message
    pub message: String,
    /// Base64 of the raw file bytes
    pub content: String,
    /// Target branch
    pub branch: String,
    /// Existing blob SHA; present means update, absent means create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl PutContentsPayload {
    /// Encode `raw` for transport without altering it
    pub fn new(message: &str, raw: &str, branch: &str, sha: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            content: BASE64.encode(raw.as_bytes()),
            branch: branch.to_string(),
            sha,
        }
    }
}

/// `POST /pulls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePullPayload {
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
    /// Source branch
    pub head: String,
    /// Target branch
    pub base: String,
}
