//! Tool-call surface exposed to the agent runtime
//!
//! Each tool takes JSON arguments and answers with a JSON object carrying a
//! `status` of `success` or `error`. Tools never return Rust errors to the
//! caller.

mod publish;
mod save;

pub use publish::{PublishToHostingTool, publish_to_hosting};
pub use save::{SaveBlogContentTool, SaveResult, save_blog_content};

use crate::artifact::ToolContext;
use crate::config::PublisherConfig;
use async_trait::async_trait;
use serde_json::{Value, json};

/// A callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the agent calls the tool by
    fn name(&self) -> &str;

    /// What the tool does, shown to the model
    fn description(&self) -> &str;

    /// JSON Schema of the arguments
    fn parameters_schema(&self) -> Value;

    /// Run with JSON arguments
    async fn execute(&self, args: Value, ctx: &dyn ToolContext) -> Value;
}

/// Tools by name
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Writer and publisher tools
    pub fn standard(config: &PublisherConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SaveBlogContentTool));
        registry.register(Box::new(PublishToHostingTool::new(config.clone())));
        registry
    }

    /// Add a tool, replacing any with the same name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    /// Look up a tool
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| &**t)
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Function declarations for the model
    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "parameters": t.parameters_schema(),
                })
            })
            .collect()
    }

    /// Dispatch a call by name
    pub async fn call(&self, name: &str, args: Value, ctx: &dyn ToolContext) -> Value {
        match self.get(name) {
            Some(tool) => {
                tracing::info!(tool = name, "tool call");
                tool.execute(args, ctx).await
            }
            None => error_response(&format!("Unknown tool: {name}")),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn error_response(message: &str) -> Value {
    json!({ "status": "error", "message": message })
}
