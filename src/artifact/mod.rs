//! Artifact storage and session state shared between pipeline stages
//!
//! The writer saves the post under [`BLOG_ARTIFACT_FILENAME`] and records
//! `title`/`slug` in state; the publisher reads both and never writes the
//! artifact.

mod file;
mod memory;

pub use file::FileSession;
pub use memory::MemorySession;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed key of the blog post artifact
pub const BLOG_ARTIFACT_FILENAME: &str = "blog_content.md";

/// State key for the post title
pub const STATE_TITLE: &str = "title";
/// State key for the post slug
pub const STATE_SLUG: &str = "slug";

/// One saved version of a named blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact key
    pub name: String,
    /// Version, starting at 0
    pub version: u64,
    /// Content exactly as saved
    pub content: String,
    /// When this version was saved
    pub saved_at: DateTime<Utc>,
}

/// Capabilities a tool receives from the agent runtime
///
/// Artifact versions grow monotonically per name. State is a flat
/// string map scoped to one pipeline run.
#[async_trait]
pub trait ToolContext: Send + Sync {
    /// Store `content` under `name`, returning the new version
    async fn save_artifact(&self, name: &str, content: &str) -> Result<u64>;

    /// Latest version stored under `name`
    async fn load_artifact(&self, name: &str) -> Result<Option<Artifact>>;

    /// Read a state value; unreadable state is an error, not absence
    fn get_state(&self, key: &str) -> Result<Option<String>>;

    /// Write a state value
    fn set_state(&self, key: &str, value: &str) -> Result<()>;
}
