//! GitHub authentication

use crate::auth::AuthSource;
use crate::config::{PublisherConfig, TOKEN_VAR};
use crate::error::{Error, Result};

/// GitHub authentication configuration
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
    /// API base URL the token is used against
    pub api_url: String,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("source", &self.source)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl GitHubAuthConfig {
    /// Use a token handed in directly
    pub fn explicit(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            source: AuthSource::Explicit,
            api_url: api_url.into(),
        }
    }
}

/// Get GitHub authentication from configuration
///
/// Fails with [`Error::AuthNotConfigured`] when `BLOG_GITHUB_TOKEN` is unset.
pub fn get_github_auth(config: &PublisherConfig) -> Result<GitHubAuthConfig> {
    match config.token.as_deref() {
        Some(token) if !token.is_empty() => Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::EnvVar,
            api_url: config.api_url.clone(),
        }),
        _ => {
            tracing::warn!("{TOKEN_VAR} is not set");
            Err(Error::AuthNotConfigured)
        }
    }
}

/// Test GitHub authentication
///
/// Returns the login of the token's user.
pub async fn test_github_auth(config: &GitHubAuthConfig) -> Result<String> {
    let octocrab = octocrab::Octocrab::builder()
        .personal_token(config.token.clone())
        .base_uri(config.api_url.as_str())?
        .build()?;

    let user = octocrab.current().user().await.inspect_err(|e| {
        tracing::warn!("token rejected by {}: {e}", config.api_url);
    })?;

    Ok(user.login)
}
