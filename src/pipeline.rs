//! Two-stage pipeline: produce, then publish
//!
//! Stage 1 (a [`ContentProducer`]) saves the post and its title/slug into the
//! session. Stage 2 reads them back and publishes. Stages never overlap and
//! share nothing but the session.

use crate::artifact::{STATE_SLUG, STATE_TITLE, ToolContext};
use crate::config::PublisherConfig;
use crate::error::{Error, Result};
use crate::frontmatter::{Frontmatter, slugify};
use crate::platform::HostingApi;
use crate::publish::{ProgressCallback, publish};
use crate::tools::{SaveResult, save_blog_content};
use crate::types::{PublishRequest, PublishResult};
use async_trait::async_trait;

/// Stage 1: writes the post into the session
///
/// In production this is a language-model agent calling
/// `save_blog_content`; the pipeline only needs it to finish.
#[async_trait]
pub trait ContentProducer: Send + Sync {
    /// Produce a post about `topic` and save it into `ctx`
    async fn produce(&self, topic: &str, ctx: &dyn ToolContext) -> Result<()>;
}

/// Producer for an already-written markdown post
#[derive(Debug, Clone)]
pub struct MarkdownProducer {
    content: String,
    title: Option<String>,
    slug: Option<String>,
}

impl MarkdownProducer {
    /// Post with metadata taken from its frontmatter
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
            slug: None,
        }
    }

    /// Override the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the slug
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Title and slug: explicit values, then frontmatter, then a slug
    /// generated from the title
    pub fn metadata(&self) -> Result<(String, String)> {
        let fm = Frontmatter::parse(&self.content).unwrap_or_default();

        let title = self
            .title
            .clone()
            .or_else(|| fm.title().map(ToString::to_string))
            .ok_or_else(|| {
                Error::InvalidContent("no title in frontmatter and none given".to_string())
            })?;

        let slug = self
            .slug
            .clone()
            .or_else(|| fm.slug().map(ToString::to_string))
            .unwrap_or_else(|| slugify(&title));
        if slug.is_empty() {
            return Err(Error::InvalidContent(format!(
                "cannot derive a slug from title {title:?}"
            )));
        }

        Ok((title, slug))
    }
}

#[async_trait]
impl ContentProducer for MarkdownProducer {
    async fn produce(&self, _topic: &str, ctx: &dyn ToolContext) -> Result<()> {
        if self.content.is_empty() {
            return Err(Error::ContentMissing);
        }
        let (title, slug) = self.metadata()?;
        match save_blog_content(ctx, &self.content, &title, &slug).await {
            SaveResult::Success { .. } => Ok(()),
            SaveResult::Error { message } => Err(Error::Storage(message)),
        }
    }
}

/// The request the publisher agent is instructed to make
///
/// Needs `slug` in state; `title` falls back to the slug.
pub fn request_from_state(ctx: &dyn ToolContext) -> Result<PublishRequest> {
    let slug = ctx
        .get_state(STATE_SLUG)?
        .filter(|s| !s.is_empty())
        .ok_or(Error::ContentMissing)?;
    let title = ctx
        .get_state(STATE_TITLE)?
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| slug.clone());
    Ok(PublishRequest::for_post(&title, &slug))
}

/// Stage 2: publish whatever stage 1 left in the session
pub async fn run_publisher(
    ctx: &dyn ToolContext,
    api: &dyn HostingApi,
    config: &PublisherConfig,
    progress: &dyn ProgressCallback,
) -> PublishResult {
    match request_from_state(ctx) {
        Ok(request) => publish(ctx, api, config, &request, progress).await,
        Err(e) => e.into(),
    }
}

/// Writer followed by publisher
pub struct Pipeline<'a> {
    producer: &'a dyn ContentProducer,
    api: &'a dyn HostingApi,
    config: &'a PublisherConfig,
}

impl<'a> Pipeline<'a> {
    /// Compose the two stages
    pub fn new(
        producer: &'a dyn ContentProducer,
        api: &'a dyn HostingApi,
        config: &'a PublisherConfig,
    ) -> Self {
        Self {
            producer,
            api,
            config,
        }
    }

    /// Run both stages in order
    ///
    /// A producer failure is returned as an error and nothing is published.
    pub async fn run(
        &self,
        topic: &str,
        ctx: &dyn ToolContext,
        progress: &dyn ProgressCallback,
    ) -> Result<PublishResult> {
        self.producer.produce(topic, ctx).await?;
        Ok(run_publisher(ctx, self.api, self.config, progress).await)
    }
}
