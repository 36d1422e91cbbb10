//! Authentication for the hosting API
//!
//! The token comes from configuration (`BLOG_GITHUB_TOKEN`); nothing else is
//! consulted.

mod github;

pub use github::{get_github_auth, test_github_auth, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token supplied programmatically
    Explicit,
}
