//! `save_blog_content` tool

use crate::artifact::{BLOG_ARTIFACT_FILENAME, STATE_SLUG, STATE_TITLE, ToolContext};
use crate::error::Result;
use crate::tools::{Tool, error_response};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Response of `save_blog_content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveResult {
    /// Saved
    Success {
        /// Confirmation including the version
        message: String,
        /// Post title
        title: String,
        /// Post slug
        slug: String,
        /// Artifact version written
        version: u64,
    },
    /// Not saved
    Error {
        /// Failure with cause
        message: String,
    },
}

/// Save the post for the publisher and record its title and slug
///
/// The content is stored exactly as given.
pub async fn save_blog_content(
    ctx: &dyn ToolContext,
    content: &str,
    title: &str,
    slug: &str,
) -> SaveResult {
    match try_save(ctx, content, title, slug).await {
        Ok(version) => {
            tracing::info!("Saved blog content to artifact version {version}");
            SaveResult::Success {
                message: format!("Blog content saved successfully (version {version})"),
                title: title.to_string(),
                slug: slug.to_string(),
                version,
            }
        }
        Err(e) => {
            tracing::error!("Failed to save blog content: {e}");
            SaveResult::Error {
                message: format!("Failed to save blog content: {e}"),
            }
        }
    }
}

async fn try_save(ctx: &dyn ToolContext, content: &str, title: &str, slug: &str) -> Result<u64> {
    let version = ctx.save_artifact(BLOG_ARTIFACT_FILENAME, content).await?;
    ctx.set_state(STATE_TITLE, title)?;
    ctx.set_state(STATE_SLUG, slug)?;
    Ok(version)
}

#[derive(Deserialize)]
struct SaveArgs {
    content: String,
    title: String,
    slug: String,
}

/// Writer-side tool
pub struct SaveBlogContentTool;

#[async_trait]
impl Tool for SaveBlogContentTool {
    fn name(&self) -> &str {
        "save_blog_content"
    }

    fn description(&self) -> &str {
        "Save the complete blog post (markdown with YAML frontmatter) for publishing. \
         The content is stored exactly as provided."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The complete markdown for the post, including frontmatter"
                },
                "title": {
                    "type": "string",
                    "description": "The title of the blog post"
                },
                "slug": {
                    "type": "string",
                    "description": "URL slug for the post (e.g. \"my-awesome-post\")"
                }
            },
            "required": ["content", "title", "slug"]
        })
    }

    async fn execute(&self, args: Value, ctx: &dyn ToolContext) -> Value {
        let args: SaveArgs = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => {
                return error_response(&format!("Invalid arguments for {}: {e}", self.name()));
            }
        };

        let result = save_blog_content(ctx, &args.content, &args.title, &args.slug).await;
        serde_json::to_value(result)
            .unwrap_or_else(|e| error_response(&format!("Failed to encode result: {e}")))
    }
}
