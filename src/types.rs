//! Core types for blog-pipeline

use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// A repository on the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Caller-supplied parameters for one publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Branch to create (e.g. `blog/my-post`)
    pub branch_name: String,
    /// File name placed under the configured content path
    pub file_name: String,
    /// Commit message for the file write
    pub commit_message: String,
    /// Pull request title
    pub pr_title: String,
    /// Pull request body
    pub pr_body: String,
    /// Overrides the configured owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    /// Overrides the configured repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
}

impl PublishRequest {
    /// Build the request the publisher stage uses for a post
    pub fn for_post(title: &str, slug: &str) -> Self {
        Self {
            branch_name: format!("blog/{slug}"),
            file_name: format!("{slug}.md"),
            commit_message: format!("Add blog: {title}"),
            pr_title: format!("Blog: {title}"),
            pr_body: format!("This PR adds a new blog post: {title}"),
            repo_owner: None,
            repo_name: None,
        }
    }
}

/// A successful publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Published {
    /// Web URL of the created or existing PR
    pub pr_url: String,
    /// Branch holding the post
    pub branch: String,
    /// Repository path of the written file
    pub file_path: String,
}

/// Outcome of a publish, as handed back to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishResult {
    /// Post is on a branch with an open PR
    Success {
        /// Human-readable summary
        message: String,
        /// Web URL of the PR
        pr_url: String,
        /// Branch holding the post
        branch: String,
        /// Repository path of the written file
        file_path: String,
    },
    /// Publishing stopped at some step
    Error {
        /// Human-readable failure
        message: String,
        /// Raw API response body or cause
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
        /// Failure classification
        kind: ErrorKind,
    },
}

impl PublishResult {
    /// Whether the publish succeeded
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// PR URL on success
    pub fn pr_url(&self) -> Option<&str> {
        match self {
            Self::Success { pr_url, .. } => Some(pr_url),
            Self::Error { .. } => None,
        }
    }

    /// Message, for either outcome
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message, .. } => message,
        }
    }
}

impl From<Published> for PublishResult {
    fn from(p: Published) -> Self {
        Self::Success {
            message: "Blog post published successfully".to_string(),
            pr_url: p.pr_url,
            branch: p.branch,
            file_path: p.file_path,
        }
    }
}

impl From<Error> for PublishResult {
    fn from(err: Error) -> Self {
        Self::Error {
            message: err.user_message(),
            details: err.details(),
            kind: err.kind(),
        }
    }
}

impl From<crate::error::Result<Published>> for PublishResult {
    fn from(result: crate::error::Result<Published>) -> Self {
        match result {
            Ok(p) => p.into(),
            Err(e) => e.into(),
        }
    }
}
