//! Publish and run commands - stage 2, or both stages

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, arrow};
use crate::cli::{open_session, read_post};
use anstream::{eprintln, println};
use anyhow::{Result, bail};
use blog_pipeline::config::PublisherConfig;
use blog_pipeline::pipeline::{MarkdownProducer, Pipeline, request_from_state};
use blog_pipeline::platform::create_hosting_service;
use blog_pipeline::publish::ProgressCallback;
use blog_pipeline::tools::publish_to_hosting;
use blog_pipeline::types::{PublishRequest, PublishResult};
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::Path;

/// Overrides for the publish request; unset fields come from the session
#[derive(clap::Args, Debug, Default)]
pub struct PublishArgs {
    /// Branch to create (default: `blog/<slug>`)
    #[arg(long)]
    pub branch: Option<String>,

    /// File name under the content path (default: `<slug>.md`)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Commit message (default: `Add blog: <title>`)
    #[arg(long)]
    pub commit_message: Option<String>,

    /// Pull request title (default: `Blog: <title>`)
    #[arg(long)]
    pub pr_title: Option<String>,

    /// Pull request body
    #[arg(long)]
    pub pr_body: Option<String>,

    /// Repository owner (default: `BLOG_REPO_OWNER`)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (default: `BLOG_REPO_NAME`)
    #[arg(long)]
    pub repo: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl PublishArgs {
    fn apply(&self, base: PublishRequest) -> PublishRequest {
        PublishRequest {
            branch_name: self.branch.clone().unwrap_or(base.branch_name),
            file_name: self.file_name.clone().unwrap_or(base.file_name),
            commit_message: self.commit_message.clone().unwrap_or(base.commit_message),
            pr_title: self.pr_title.clone().unwrap_or(base.pr_title),
            pr_body: self.pr_body.clone().unwrap_or(base.pr_body),
            repo_owner: self.owner.clone().or(base.repo_owner),
            repo_name: self.repo.clone().or(base.repo_name),
        }
    }
}

fn describe(config: &PublisherConfig, request: &PublishRequest) {
    let repo = config.repo_ref(request.repo_owner.as_deref(), request.repo_name.as_deref());
    println!(
        "Publishing {} to {}",
        config.file_path(&request.file_name).accent(),
        repo.to_string().emphasis()
    );
    println!("  {} branch {}", arrow(), request.branch_name.accent());
    println!("  {} PR \"{}\"", arrow(), request.pr_title);
}

/// Ask before touching the remote, only when someone can answer
fn confirmed(yes: bool) -> Result<bool> {
    if yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt("Create branch, commit, and pull request?")
        .default(true)
        .interact()?)
}

fn report(result: &PublishResult) -> Result<()> {
    match result {
        PublishResult::Success { .. } => {
            println!();
            println!("{}", "Blog post published".success());
            Ok(())
        }
        PublishResult::Error {
            message, details, ..
        } => {
            if let Some(details) = details {
                eprintln!("    {}", details.muted().for_stderr());
            }
            bail!("{message}")
        }
    }
}

/// Run the publish command
pub async fn run_publish(config: &PublisherConfig, args: &PublishArgs) -> Result<()> {
    let session = open_session(config)?;
    let request = args.apply(request_from_state(&session)?);

    describe(config, &request);
    if !confirmed(args.yes)? {
        println!("Aborted");
        return Ok(());
    }

    let progress = CliProgress::new();
    let result = publish_to_hosting(&session, config, &request, &progress).await;
    report(&result)
}

/// Run the save-then-publish pipeline on a markdown file
pub async fn run_pipeline(
    config: &PublisherConfig,
    file: &Path,
    title: Option<String>,
    slug: Option<String>,
    yes: bool,
) -> Result<()> {
    // Fail on missing auth before anything is saved
    let api = create_hosting_service(config)?;

    let mut producer = MarkdownProducer::new(read_post(file).await?);
    if let Some(title) = title {
        producer = producer.with_title(title);
    }
    if let Some(slug) = slug {
        producer = producer.with_slug(slug);
    }
    let (title, slug) = producer.metadata()?;

    let request = PublishRequest::for_post(&title, &slug);
    describe(config, &request);
    if !confirmed(yes)? {
        println!("Aborted");
        return Ok(());
    }

    let session = open_session(config)?;
    let progress = CliProgress::new();
    progress
        .on_message(&format!("Saving {title}"))
        .await;

    let pipeline = Pipeline::new(&producer, api.as_ref(), config);
    let result = pipeline
        .run(&file.display().to_string(), &session, &progress)
        .await?;
    report(&result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_defaults_for_unset_flags() {
        let args = PublishArgs {
            branch: Some("drafts/x".to_string()),
            owner: Some("me".to_string()),
            ..PublishArgs::default()
        };
        let req = args.apply(PublishRequest::for_post("X", "x"));
        assert_eq!(req.branch_name, "drafts/x");
        assert_eq!(req.file_name, "x.md");
        assert_eq!(req.pr_title, "Blog: X");
        assert_eq!(req.repo_owner.as_deref(), Some("me"));
        assert!(req.repo_name.is_none());
    }
}
