//! Mock hosting API for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use blog_pipeline::error::{Error, Result};
use blog_pipeline::platform::{
    ApiResponse, CreatePullPayload, CreateRefPayload, HostingApi, PutContentsPayload,
};
use blog_pipeline::types::RepoRef;
use serde_json::json;
use std::sync::Mutex;

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetRepository {
        repo: String,
    },
    GetBranchRef {
        repo: String,
        branch: String,
    },
    CreateRef {
        repo: String,
        payload: CreateRefPayload,
    },
    GetContents {
        repo: String,
        path: String,
        branch: String,
    },
    PutContents {
        repo: String,
        path: String,
        payload: PutContentsPayload,
    },
    CreatePull {
        repo: String,
        payload: CreatePullPayload,
    },
    ListPulls {
        repo: String,
        head: String,
        state: String,
    },
}

/// Scripted hosting API
///
/// Every endpoint has a canned response; the defaults describe the happy
/// path (repo with `main`, new branch, no existing file, PR created).
///
/// Features:
/// - Call tracking for verification
/// - Configurable response per endpoint
/// - Error injection for any endpoint (by method name)
pub struct MockHostingApi {
    repository: Mutex<ApiResponse>,
    branch_ref: Mutex<ApiResponse>,
    create_ref: Mutex<ApiResponse>,
    contents: Mutex<ApiResponse>,
    put_contents: Mutex<ApiResponse>,
    create_pull: Mutex<ApiResponse>,
    list_pulls: Mutex<ApiResponse>,
    calls: Mutex<Vec<Call>>,
    error_on: Mutex<Option<&'static str>>,
}

impl Default for MockHostingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHostingApi {
    /// Happy-path responses
    pub fn new() -> Self {
        Self {
            repository: Mutex::new(ApiResponse::new(
                200,
                json!({"default_branch": "main"}).to_string(),
            )),
            branch_ref: Mutex::new(ApiResponse::new(
                200,
                json!({"ref": "refs/heads/main", "object": {"sha": "base123"}}).to_string(),
            )),
            create_ref: Mutex::new(ApiResponse::new(
                201,
                json!({"ref": "refs/heads/blog/test"}).to_string(),
            )),
            contents: Mutex::new(ApiResponse::new(
                404,
                json!({"message": "Not Found"}).to_string(),
            )),
            put_contents: Mutex::new(ApiResponse::new(
                201,
                json!({"content": {"sha": "blob1"}}).to_string(),
            )),
            create_pull: Mutex::new(ApiResponse::new(
                201,
                json!({"html_url": "https://github.com/queryplanner/blogs/pull/1"}).to_string(),
            )),
            list_pulls: Mutex::new(ApiResponse::new(200, "[]")),
            calls: Mutex::new(Vec::new()),
            error_on: Mutex::new(None),
        }
    }

    pub fn set_repository(&self, status: u16, body: impl Into<String>) {
        *self.repository.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_branch_ref(&self, status: u16, body: impl Into<String>) {
        *self.branch_ref.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_create_ref(&self, status: u16, body: impl Into<String>) {
        *self.create_ref.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_contents(&self, status: u16, body: impl Into<String>) {
        *self.contents.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_put_contents(&self, status: u16, body: impl Into<String>) {
        *self.put_contents.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_create_pull(&self, status: u16, body: impl Into<String>) {
        *self.create_pull.lock().unwrap() = ApiResponse::new(status, body);
    }

    pub fn set_list_pulls(&self, status: u16, body: impl Into<String>) {
        *self.list_pulls.lock().unwrap() = ApiResponse::new(status, body);
    }

    /// Fail the named method (e.g. `"put_contents"`) with a transport-style error
    pub fn fail_on(&self, method: &'static str) {
        *self.error_on.lock().unwrap() = Some(method);
    }

    /// All calls in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The single `PUT /contents` payload, if any
    pub fn put_payload(&self) -> Option<PutContentsPayload> {
        self.calls().into_iter().find_map(|c| match c {
            Call::PutContents { payload, .. } => Some(payload),
            _ => None,
        })
    }

    /// The `POST /pulls` payload, if any
    pub fn pull_payload(&self) -> Option<CreatePullPayload> {
        self.calls().into_iter().find_map(|c| match c {
            Call::CreatePull { payload, .. } => Some(payload),
            _ => None,
        })
    }

    /// Repositories addressed, one per call
    pub fn repos(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| match c {
                Call::GetRepository { repo }
                | Call::GetBranchRef { repo, .. }
                | Call::CreateRef { repo, .. }
                | Call::GetContents { repo, .. }
                | Call::PutContents { repo, .. }
                | Call::CreatePull { repo, .. }
                | Call::ListPulls { repo, .. } => repo,
            })
            .collect()
    }

    fn record(&self, method: &'static str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.error_on.lock().unwrap() == Some(method) {
            return Err(Error::Internal(format!("injected failure in {method}")));
        }
        Ok(())
    }
}

#[async_trait]
impl HostingApi for MockHostingApi {
    async fn get_repository(&self, repo: &RepoRef) -> Result<ApiResponse> {
        self.record(
            "get_repository",
            Call::GetRepository {
                repo: repo.to_string(),
            },
        )?;
        Ok(self.repository.lock().unwrap().clone())
    }

    async fn get_branch_ref(&self, repo: &RepoRef, branch: &str) -> Result<ApiResponse> {
        self.record(
            "get_branch_ref",
            Call::GetBranchRef {
                repo: repo.to_string(),
                branch: branch.to_string(),
            },
        )?;
        Ok(self.branch_ref.lock().unwrap().clone())
    }

    async fn create_ref(&self, repo: &RepoRef, payload: &CreateRefPayload) -> Result<ApiResponse> {
        self.record(
            "create_ref",
            Call::CreateRef {
                repo: repo.to_string(),
                payload: payload.clone(),
            },
        )?;
        Ok(self.create_ref.lock().unwrap().clone())
    }

    async fn get_contents(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<ApiResponse> {
        self.record(
            "get_contents",
            Call::GetContents {
                repo: repo.to_string(),
                path: path.to_string(),
                branch: branch.to_string(),
            },
        )?;
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn put_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        payload: &PutContentsPayload,
    ) -> Result<ApiResponse> {
        self.record(
            "put_contents",
            Call::PutContents {
                repo: repo.to_string(),
                path: path.to_string(),
                payload: payload.clone(),
            },
        )?;
        Ok(self.put_contents.lock().unwrap().clone())
    }

    async fn create_pull(
        &self,
        repo: &RepoRef,
        payload: &CreatePullPayload,
    ) -> Result<ApiResponse> {
        self.record(
            "create_pull",
            Call::CreatePull {
                repo: repo.to_string(),
                payload: payload.clone(),
            },
        )?;
        Ok(self.create_pull.lock().unwrap().clone())
    }

    async fn list_pulls(&self, repo: &RepoRef, head: &str, state: &str) -> Result<ApiResponse> {
        self.record(
            "list_pulls",
            Call::ListPulls {
                repo: repo.to_string(),
                head: head.to_string(),
                state: state.to_string(),
            },
        )?;
        Ok(self.list_pulls.lock().unwrap().clone())
    }
}
