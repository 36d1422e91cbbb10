//! Error types for blog-pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while saving or publishing a blog post
#[derive(Debug, Error)]
pub enum Error {
    /// No API token configured
    #[error("BLOG_GITHUB_TOKEN not configured")]
    AuthNotConfigured,

    /// The publisher ran before the writer saved anything
    #[error("No blog content found. Writer must save first.")]
    ContentMissing,

    /// `GET /repos/{owner}/{repo}` did not return 200
    #[error("Failed to fetch repo info: {status}")]
    RepositoryLookupFailed {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The default branch ref could not be read
    #[error("Failed to get branch ref: {status}")]
    BaseRefLookupFailed {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The ref lookup succeeded but carried no commit SHA
    #[error("Could not get base SHA")]
    MissingBaseSha {
        /// Raw response body
        body: String,
    },

    /// Creating the feature branch failed for a reason other than "already exists"
    #[error("Failed to create branch: {status}")]
    BranchCreateFailed {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Creating or updating the post file failed
    #[error("Failed to create file: {status}")]
    FileWriteFailed {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Opening the pull request failed for a reason other than "already exists"
    #[error("Failed to create PR: {status}")]
    PrCreateFailed {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The API says a PR exists for the branch but listing found none
    #[error("PR already exists but could not find its URL")]
    PrLookupAmbiguous {
        /// Body of the conflicting create response
        body: String,
    },

    /// Transport-level failure (connect, TLS, timeout)
    #[error("Network error while communicating with GitHub")]
    Network(#[from] reqwest::Error),

    /// Post content cannot be used as given
    #[error("Invalid post: {0}")]
    InvalidContent(String),

    /// Artifact or session storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// GitHub API error surfaced by octocrab
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode/encode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Coarse classification of an [`Error`], as reported to tool callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Token missing
    AuthNotConfigured,
    /// No artifact saved
    ContentMissing,
    /// Repository metadata lookup failed
    RepositoryLookupFailed,
    /// Default branch ref lookup failed
    BaseRefLookupFailed,
    /// Ref lookup returned no SHA
    MissingBaseSha,
    /// Branch creation failed
    BranchCreateFailed,
    /// File upsert failed
    FileWriteFailed,
    /// PR creation failed
    PrCreateFailed,
    /// PR exists but could not be found
    PrLookupAmbiguous,
    /// Transport failure
    NetworkError,
    /// Artifact/session storage failure
    StorageError,
    /// Bad configuration
    ConfigError,
    /// Catch-all
    UnexpectedError,
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthNotConfigured => ErrorKind::AuthNotConfigured,
            Self::ContentMissing => ErrorKind::ContentMissing,
            Self::RepositoryLookupFailed { .. } => ErrorKind::RepositoryLookupFailed,
            Self::BaseRefLookupFailed { .. } => ErrorKind::BaseRefLookupFailed,
            Self::MissingBaseSha { .. } => ErrorKind::MissingBaseSha,
            Self::BranchCreateFailed { .. } => ErrorKind::BranchCreateFailed,
            Self::FileWriteFailed { .. } => ErrorKind::FileWriteFailed,
            Self::PrCreateFailed { .. } => ErrorKind::PrCreateFailed,
            Self::PrLookupAmbiguous { .. } => ErrorKind::PrLookupAmbiguous,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::Storage(_) => ErrorKind::StorageError,
            Self::Config(_) => ErrorKind::ConfigError,
            Self::InvalidContent(_)
            | Self::GitHubApi(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Internal(_) => ErrorKind::UnexpectedError,
        }
    }

    /// Message shown to the caller
    ///
    /// Catch-all variants collapse to a generic message; their cause goes in
    /// [`Error::details`].
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::UnexpectedError => "An unexpected error occurred".to_string(),
            _ => self.to_string(),
        }
    }

    /// Raw API body or underlying cause, if any
    pub fn details(&self) -> Option<String> {
        match self {
            Self::AuthNotConfigured | Self::ContentMissing => None,
            Self::RepositoryLookupFailed { body, .. }
            | Self::BaseRefLookupFailed { body, .. }
            | Self::MissingBaseSha { body }
            | Self::BranchCreateFailed { body, .. }
            | Self::FileWriteFailed { body, .. }
            | Self::PrCreateFailed { body, .. }
            | Self::PrLookupAmbiguous { body } => Some(body.clone()),
            Self::Network(e) => Some(e.to_string()),
            Self::InvalidContent(msg)
            | Self::Storage(msg)
            | Self::Config(msg)
            | Self::GitHubApi(msg)
            | Self::Internal(msg) => Some(msg.clone()),
            Self::Io(e) => Some(e.to_string()),
            Self::Json(e) => Some(e.to_string()),
        }
    }
}
