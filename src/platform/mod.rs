//! Hosting service access
//!
//! One trait method per REST endpoint the publish workflow touches. Methods
//! return the raw status and body so the workflow can apply its own
//! idempotence rules; only transport failures are errors.

mod classify;
mod factory;
mod github;
mod payload;

pub use classify::{
    classify_pull_create, classify_ref_create, file_probe_found, file_write_succeeded,
    CreateOutcome, PR_EXISTS_MARKER, REF_EXISTS_MARKER,
};
pub use factory::create_hosting_service;
pub use github::GitHubClient;
pub use payload::{
    ContentInfo, CreatePullPayload, CreateRefPayload, GitRef, PullInfo, PutContentsPayload,
    RefObject, RepoInfo,
};

use crate::error::Result;
use crate::types::RepoRef;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Status and body of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// REST operations against the hosting service
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}`
    async fn get_repository(&self, repo: &RepoRef) -> Result<ApiResponse>;

    /// `GET /repos/{owner}/{repo}/git/ref/heads/{branch}`
    async fn get_branch_ref(&self, repo: &RepoRef, branch: &str) -> Result<ApiResponse>;

    /// `POST /repos/{owner}/{repo}/git/refs`
    async fn create_ref(&self, repo: &RepoRef, payload: &CreateRefPayload) -> Result<ApiResponse>;

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`
    async fn get_contents(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<ApiResponse>;

    /// `PUT /repos/{owner}/{repo}/contents/{path}`
    async fn put_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        payload: &PutContentsPayload,
    ) -> Result<ApiResponse>;

    /// `POST /repos/{owner}/{repo}/pulls`
    async fn create_pull(&self, repo: &RepoRef, payload: &CreatePullPayload)
    -> Result<ApiResponse>;

    /// `GET /repos/{owner}/{repo}/pulls?head={head}&state={state}`
    async fn list_pulls(&self, repo: &RepoRef, head: &str, state: &str) -> Result<ApiResponse>;
}
