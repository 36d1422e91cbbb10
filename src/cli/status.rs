//! Status and reset commands - inspect or discard the session

use crate::cli::open_session;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use blog_pipeline::artifact::{BLOG_ARTIFACT_FILENAME, STATE_SLUG, STATE_TITLE, ToolContext};
use blog_pipeline::config::{PublisherConfig, TOKEN_VAR};
use blog_pipeline::error::Result;

/// Run the status command
pub async fn run_status(config: &PublisherConfig) -> Result<()> {
    let session = open_session(config)?;

    println!("{}", "Session".emphasis());
    println!("  {}", session.root().display().to_string().muted());

    match session.load_artifact(BLOG_ARTIFACT_FILENAME).await? {
        Some(artifact) => {
            let title = session.get_state(STATE_TITLE)?.unwrap_or_default();
            let slug = session.get_state(STATE_SLUG)?.unwrap_or_default();
            println!("  Title:   {}", title.emphasis());
            println!("  Slug:    {}", slug.accent());
            println!(
                "  Content: v{} ({} bytes, saved {})",
                artifact.version,
                artifact.content.len(),
                artifact.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => println!("  {}", "No post saved".muted()),
    }

    println!();
    println!("{}", "Target".emphasis());
    println!(
        "  {}/{}",
        config.repo_ref(None, None),
        config.content_path
    );
    if config.token.is_some() {
        println!("  {} {TOKEN_VAR} set", check());
    } else {
        println!("  {} {TOKEN_VAR} not set", cross());
    }

    Ok(())
}

/// Run the reset command
pub fn run_reset(config: &PublisherConfig) -> Result<()> {
    let session = open_session(config)?;
    session.clear()?;
    println!("{} Cleared {}", check(), session.root().display().to_string().muted());
    Ok(())
}
