//! `publish_to_hosting` tool

use crate::artifact::ToolContext;
use crate::config::PublisherConfig;
use crate::platform::{HostingApi, create_hosting_service};
use crate::publish::{NoopProgress, ProgressCallback, load_post, publish};
use crate::tools::{Tool, error_response};
use crate::types::{PublishRequest, PublishResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Publish the saved post with a client built from `config`
///
/// Missing content is reported first, then a missing token; neither makes
/// a request.
pub async fn publish_to_hosting(
    ctx: &dyn ToolContext,
    config: &PublisherConfig,
    request: &PublishRequest,
    progress: &dyn ProgressCallback,
) -> PublishResult {
    if let Err(e) = load_post(ctx).await {
        progress.on_error(&e).await;
        return e.into();
    }

    match create_hosting_service(config) {
        Ok(api) => publish(ctx, api.as_ref(), config, request, progress).await,
        Err(e) => {
            progress.on_error(&e).await;
            e.into()
        }
    }
}

/// Publisher-side tool
pub struct PublishToHostingTool {
    config: PublisherConfig,
    api: Option<Arc<dyn HostingApi>>,
}

impl PublishToHostingTool {
    /// Tool that builds a GitHub client per call
    pub const fn new(config: PublisherConfig) -> Self {
        Self { config, api: None }
    }

    /// Tool bound to a specific hosting client
    pub fn with_api(config: PublisherConfig, api: Arc<dyn HostingApi>) -> Self {
        Self {
            config,
            api: Some(api),
        }
    }
}

#[async_trait]
impl Tool for PublishToHostingTool {
    fn name(&self) -> &str {
        "publish_to_hosting"
    }

    fn description(&self) -> &str {
        "Publish the saved blog post: create a branch, add the file, and open a pull request. \
         The post content is read from the saved artifact, unchanged."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "branch_name": {
                    "type": "string",
                    "description": "Name for the new branch (e.g. \"blog/new-post-slug\")"
                },
                "file_name": {
                    "type": "string",
                    "description": "File name for the post (e.g. \"my-post.md\"), placed under the content path"
                },
                "commit_message": {
                    "type": "string",
                    "description": "Commit message for the change"
                },
                "pr_title": {
                    "type": "string",
                    "description": "Title for the pull request"
                },
                "pr_body": {
                    "type": "string",
                    "description": "Body for the pull request"
                },
                "repo_owner": {
                    "type": "string",
                    "description": "Optional: repository owner (omit to use default)"
                },
                "repo_name": {
                    "type": "string",
                    "description": "Optional: repository name (omit to use default)"
                }
            },
            "required": ["branch_name", "file_name", "commit_message", "pr_title", "pr_body"]
        })
    }

    async fn execute(&self, args: Value, ctx: &dyn ToolContext) -> Value {
        let request: PublishRequest = match serde_json::from_value(args) {
            Ok(r) => r,
            Err(e) => {
                return error_response(&format!("Invalid arguments for {}: {e}", self.name()));
            }
        };

        let result = match &self.api {
            Some(api) => publish(ctx, api.as_ref(), &self.config, &request, &NoopProgress).await,
            None => publish_to_hosting(ctx, &self.config, &request, &NoopProgress).await,
        };

        serde_json::to_value(result)
            .unwrap_or_else(|e| error_response(&format!("Failed to encode result: {e}")))
    }
}
