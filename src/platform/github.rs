//! GitHub REST client

use crate::auth::GitHubAuthConfig;
use crate::config::PublisherConfig;
use crate::error::{Error, Result};
use crate::platform::{
    ApiResponse, CreatePullPayload, CreateRefPayload, HostingApi, PutContentsPayload,
};
use crate::types::RepoRef;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// GitHub service using reqwest
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client for the configured API
    ///
    /// Fails with [`Error::AuthNotConfigured`] before any request when no
    /// token is set.
    pub fn new(config: &PublisherConfig) -> Result<Self> {
        let auth = crate::auth::get_github_auth(config)?;
        Self::with_auth(&auth, config.timeout)
    }

    /// Create a client from resolved auth
    pub fn with_auth(auth: &GitHubAuthConfig, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", auth.token))
            .map_err(|_| Error::Config("token contains invalid header characters".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("blog-pipeline/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: auth.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef, path: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, repo.owner, repo.name, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, "GitHub API response");
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl HostingApi for GitHubClient {
    async fn get_repository(&self, repo: &RepoRef) -> Result<ApiResponse> {
        let url = self.repo_url(repo, "");
        tracing::debug!("GET {url}");
        self.send(self.client.get(&url)).await
    }

    async fn get_branch_ref(&self, repo: &RepoRef, branch: &str) -> Result<ApiResponse> {
        let url = self.repo_url(repo, &format!("/git/ref/heads/{branch}"));
        tracing::debug!("GET {url}");
        self.send(self.client.get(&url)).await
    }

    async fn create_ref(&self, repo: &RepoRef, payload: &CreateRefPayload) -> Result<ApiResponse> {
        let url = self.repo_url(repo, "/git/refs");
        tracing::debug!("POST {url} ({})", payload.ref_name);
        self.send(self.client.post(&url).json(payload)).await
    }

    async fn get_contents(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<ApiResponse> {
        let url = self.repo_url(repo, &format!("/contents/{path}"));
        tracing::debug!("GET {url}?ref={branch}");
        self.send(self.client.get(&url).query(&[("ref", branch)]))
            .await
    }

    async fn put_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        payload: &PutContentsPayload,
    ) -> Result<ApiResponse> {
        let url = self.repo_url(repo, &format!("/contents/{path}"));
        tracing::debug!(update = payload.sha.is_some(), "PUT {url}");
        self.send(self.client.put(&url).json(payload)).await
    }

    async fn create_pull(
        &self,
        repo: &RepoRef,
        payload: &CreatePullPayload,
    ) -> Result<ApiResponse> {
        let url = self.repo_url(repo, "/pulls");
        tracing::debug!("POST {url} ({} -> {})", payload.head, payload.base);
        self.send(self.client.post(&url).json(payload)).await
    }

    async fn list_pulls(&self, repo: &RepoRef, head: &str, state: &str) -> Result<ApiResponse> {
        let url = self.repo_url(repo, "/pulls");
        tracing::debug!("GET {url}?head={head}&state={state}");
        self.send(self.client.get(&url).query(&[("head", head), ("state", state)]))
            .await
    }
}
