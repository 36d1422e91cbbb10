//! Progress callback trait for interface-agnostic updates
//!
//! Lets the CLI (or an agent runtime) follow a publish as it happens.

use crate::error::Error;
use async_trait::async_trait;
use std::fmt;

/// Workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fetching repository metadata
    ResolvingRepository,
    /// Reading the default branch head
    ResolvingBaseRef,
    /// Creating the feature branch
    CreatingBranch,
    /// Checking whether the file exists
    ProbingFile,
    /// Writing the file
    WritingFile,
    /// Opening the pull request
    OpeningPullRequest,
    /// Publish complete
    Complete,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ResolvingRepository => "Resolving repository",
            Self::ResolvingBaseRef => "Resolving base commit",
            Self::CreatingBranch => "Creating branch",
            Self::ProbingFile => "Checking for existing file",
            Self::WritingFile => "Writing file",
            Self::OpeningPullRequest => "Opening pull request",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// What happened to the feature branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    /// Branch created from the default branch head
    Created,
    /// Branch was already there
    AlreadyExists,
}

/// What happened to the post file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// New file
    Created,
    /// Existing file replaced
    Updated,
}

/// Where the PR URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStatus {
    /// PR opened by this run
    Created,
    /// An open PR for the branch already existed
    Existing,
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a step
    async fn on_step(&self, step: Step);

    /// Called once the branch is in place
    async fn on_branch(&self, branch: &str, status: BranchStatus);

    /// Called after the file write
    async fn on_file_written(&self, path: &str, status: FileStatus);

    /// Called with the PR URL
    async fn on_pull_request(&self, url: &str, status: PrStatus);

    /// Called when the publish fails
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_step(&self, _step: Step) {}
    async fn on_branch(&self, _branch: &str, _status: BranchStatus) {}
    async fn on_file_written(&self, _path: &str, _status: FileStatus) {}
    async fn on_pull_request(&self, _url: &str, _status: PrStatus) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
