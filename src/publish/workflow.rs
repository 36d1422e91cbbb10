//! Publish workflow execution

use crate::artifact::{BLOG_ARTIFACT_FILENAME, ToolContext};
use crate::config::PublisherConfig;
use crate::error::{Error, Result};
use crate::platform::{
    ContentInfo, CreateOutcome, CreatePullPayload, CreateRefPayload, GitRef, HostingApi,
    PullInfo, PutContentsPayload, RepoInfo, classify_pull_create, classify_ref_create,
    file_probe_found, file_write_succeeded,
};
use crate::publish::{BranchStatus, FileStatus, PrStatus, ProgressCallback, Step};
use crate::types::{PublishRequest, PublishResult, Published, RepoRef};
use tracing::{info, warn};

const DEFAULT_BRANCH_FALLBACK: &str = "main";

/// Publish the saved post and report a structured result
///
/// Never fails: every error becomes [`PublishResult::Error`].
pub async fn publish(
    ctx: &dyn ToolContext,
    api: &dyn HostingApi,
    config: &PublisherConfig,
    request: &PublishRequest,
    progress: &dyn ProgressCallback,
) -> PublishResult {
    let result = execute_publish(ctx, api, config, request, progress).await;
    if let Err(e) = &result {
        warn!("publish failed: {e}");
        progress.on_error(e).await;
    }
    result.into()
}

/// Run the six publish steps
///
/// Stops at the first failing step. Nothing is rolled back: a branch or file
/// created before the failure stays in place, and re-running is safe.
pub async fn execute_publish(
    ctx: &dyn ToolContext,
    api: &dyn HostingApi,
    config: &PublisherConfig,
    request: &PublishRequest,
    progress: &dyn ProgressCallback,
) -> Result<Published> {
    let content = load_post(ctx).await?;
    let repo = config.repo_ref(request.repo_owner.as_deref(), request.repo_name.as_deref());
    let file_path = config.file_path(&request.file_name);

    progress.on_step(Step::ResolvingRepository).await;
    let default_branch = resolve_default_branch(api, &repo).await?;

    progress.on_step(Step::ResolvingBaseRef).await;
    let base_sha = resolve_base_sha(api, &repo, &default_branch).await?;

    progress.on_step(Step::CreatingBranch).await;
    let branch_status = create_branch(api, &repo, &request.branch_name, &base_sha).await?;
    progress
        .on_branch(&request.branch_name, branch_status)
        .await;

    progress.on_step(Step::ProbingFile).await;
    let existing_sha = probe_file(api, &repo, &file_path, &request.branch_name).await?;

    progress.on_step(Step::WritingFile).await;
    let file_status = write_file(
        api,
        &repo,
        &file_path,
        PutContentsPayload::new(
            &request.commit_message,
            &content,
            &request.branch_name,
            existing_sha,
        ),
    )
    .await?;
    progress.on_file_written(&file_path, file_status).await;

    progress.on_step(Step::OpeningPullRequest).await;
    let (pr_url, pr_status) = open_pull_request(api, &repo, request, &default_branch).await?;
    progress.on_pull_request(&pr_url, pr_status).await;

    progress.on_step(Step::Complete).await;
    info!("Successfully processed PR: {pr_url}");

    Ok(Published {
        pr_url,
        branch: request.branch_name.clone(),
        file_path,
    })
}

/// Latest post content; empty counts as missing
pub async fn load_post(ctx: &dyn ToolContext) -> Result<String> {
    let artifact = ctx
        .load_artifact(BLOG_ARTIFACT_FILENAME)
        .await?
        .filter(|a| !a.content.is_empty())
        .ok_or(Error::ContentMissing)?;

    info!(
        "Loaded blog content from artifact v{} ({} chars)",
        artifact.version,
        artifact.content.chars().count()
    );
    Ok(artifact.content)
}

async fn resolve_default_branch(api: &dyn HostingApi, repo: &RepoRef) -> Result<String> {
    let resp = api.get_repository(repo).await?;
    if resp.status != 200 {
        return Err(Error::RepositoryLookupFailed {
            status: resp.status,
            body: resp.body,
        });
    }

    let info: RepoInfo = resp.json()?;
    Ok(info
        .default_branch
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| DEFAULT_BRANCH_FALLBACK.to_string()))
}

async fn resolve_base_sha(api: &dyn HostingApi, repo: &RepoRef, branch: &str) -> Result<String> {
    let resp = api.get_branch_ref(repo, branch).await?;
    if resp.status != 200 {
        return Err(Error::BaseRefLookupFailed {
            status: resp.status,
            body: resp.body,
        });
    }

    // A 200 with an unexpected shape is reported as a missing SHA
    let sha = resp
        .json::<GitRef>()
        .ok()
        .and_then(|r| r.sha().map(ToString::to_string));
    sha.ok_or(Error::MissingBaseSha { body: resp.body })
}

async fn create_branch(
    api: &dyn HostingApi,
    repo: &RepoRef,
    branch: &str,
    base_sha: &str,
) -> Result<BranchStatus> {
    let resp = api
        .create_ref(repo, &CreateRefPayload::branch(branch, base_sha))
        .await?;

    match classify_ref_create(resp.status, &resp.body) {
        CreateOutcome::Created => Ok(BranchStatus::Created),
        CreateOutcome::AlreadyExists => {
            info!("Branch {branch} already exists, proceeding.");
            Ok(BranchStatus::AlreadyExists)
        }
        CreateOutcome::Failed => Err(Error::BranchCreateFailed {
            status: resp.status,
            body: resp.body,
        }),
    }
}

/// SHA of the file if it already exists on `branch`
///
/// Best effort: any status other than 200, or an unreadable body, means
/// "create".
async fn probe_file(
    api: &dyn HostingApi,
    repo: &RepoRef,
    path: &str,
    branch: &str,
) -> Result<Option<String>> {
    let resp = api.get_contents(repo, path, branch).await?;
    if !file_probe_found(resp.status) {
        return Ok(None);
    }
    Ok(resp
        .json::<ContentInfo>()
        .ok()
        .and_then(|c| c.sha)
        .filter(|s| !s.is_empty()))
}

async fn write_file(
    api: &dyn HostingApi,
    repo: &RepoRef,
    path: &str,
    payload: PutContentsPayload,
) -> Result<FileStatus> {
    let status = if payload.sha.is_some() {
        FileStatus::Updated
    } else {
        FileStatus::Created
    };

    let resp = api.put_contents(repo, path, &payload).await?;
    if !file_write_succeeded(resp.status) {
        return Err(Error::FileWriteFailed {
            status: resp.status,
            body: resp.body,
        });
    }
    Ok(status)
}

async fn open_pull_request(
    api: &dyn HostingApi,
    repo: &RepoRef,
    request: &PublishRequest,
    base: &str,
) -> Result<(String, PrStatus)> {
    let payload = CreatePullPayload {
        title: request.pr_title.clone(),
        body: request.pr_body.clone(),
        head: request.branch_name.clone(),
        base: base.to_string(),
    };

    let resp = api.create_pull(repo, &payload).await?;
    match classify_pull_create(resp.status, &resp.body) {
        CreateOutcome::Created => {
            let pr: PullInfo = resp.json()?;
            let url = pr.html_url.filter(|u| !u.is_empty()).ok_or_else(|| {
                Error::Internal(format!("pull request created without html_url: {}", resp.body))
            })?;
            Ok((url, PrStatus::Created))
        }
        CreateOutcome::AlreadyExists => {
            let url = find_open_pull(api, repo, &request.branch_name, resp.body).await?;
            info!("Found existing PR: {url}");
            Ok((url, PrStatus::Existing))
        }
        CreateOutcome::Failed => Err(Error::PrCreateFailed {
            status: resp.status,
            body: resp.body,
        }),
    }
}

/// URL of the first open PR whose head is `owner:branch`
async fn find_open_pull(
    api: &dyn HostingApi,
    repo: &RepoRef,
    branch: &str,
    conflict_body: String,
) -> Result<String> {
    let head = format!("{}:{branch}", repo.owner);
    let resp = api.list_pulls(repo, &head, "open").await?;

    let url = if resp.status == 200 {
        resp.json::<Vec<PullInfo>>()
            .ok()
            .and_then(|prs| prs.into_iter().next())
            .and_then(|pr| pr.html_url)
            .filter(|u| !u.is_empty())
    } else {
        None
    };

    url.ok_or(Error::PrLookupAmbiguous {
        body: conflict_body,
    })
}
