//! Tool command - list and call agent tools

use crate::cli::open_session;
use anyhow::{Context, Result};
use blog_pipeline::config::PublisherConfig;
use blog_pipeline::tools::ToolRegistry;
use serde_json::Value;

/// Print tool declarations
pub fn run_tool_list(config: &PublisherConfig) -> Result<()> {
    let registry = ToolRegistry::standard(config);
    let defs = Value::Array(registry.definitions());
    println!("{}", serde_json::to_string_pretty(&defs)?);
    Ok(())
}

/// Call a tool against the session and print its JSON response
pub async fn run_tool_call(config: &PublisherConfig, name: &str, args: &str) -> Result<()> {
    let args: Value = serde_json::from_str(args).context("tool arguments must be a JSON object")?;
    let session = open_session(config)?;
    let registry = ToolRegistry::standard(config);

    let response = registry.call(name, args, &session).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
