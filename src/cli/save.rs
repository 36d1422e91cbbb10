//! Save command - stage 1 from a markdown file

use crate::cli::style::{Stylize, check};
use crate::cli::{open_session, read_post};
use anstream::println;
use blog_pipeline::error::{Error, Result};
use blog_pipeline::pipeline::MarkdownProducer;
use blog_pipeline::tools::{SaveResult, save_blog_content};
use std::path::Path;

/// Run the save command
pub async fn run_save(
    config: &blog_pipeline::config::PublisherConfig,
    file: &Path,
    title: Option<String>,
    slug: Option<String>,
) -> Result<()> {
    let content = read_post(file).await?;
    if content.is_empty() {
        return Err(Error::InvalidContent("post is empty".to_string()));
    }

    let mut producer = MarkdownProducer::new(content.clone());
    if let Some(title) = title {
        producer = producer.with_title(title);
    }
    if let Some(slug) = slug {
        producer = producer.with_slug(slug);
    }
    let (title, slug) = producer.metadata()?;

    let session = open_session(config)?;
    match save_blog_content(&session, &content, &title, &slug).await {
        SaveResult::Success { message, .. } => {
            println!("{} {message}", check());
            println!("  Title: {}", title.emphasis());
            println!("  Slug:  {}", slug.accent());
            println!("  {}", session.root().display().to_string().muted());
            Ok(())
        }
        SaveResult::Error { message } => Err(Error::Storage(message)),
    }
}
