//! CLI commands
//!
//! Command implementations for the `blogpub` binary.

mod auth;
mod progress;
mod prompt;
mod publish;
mod save;
mod status;
mod style;
mod tool;

pub use auth::run_auth;
pub use prompt::{Prompt, run_prompt};
pub use publish::{PublishArgs, run_pipeline, run_publish};
pub use save::run_save;
pub use status::{run_reset, run_status};
pub use tool::{run_tool_call, run_tool_list};

use blog_pipeline::artifact::FileSession;
use blog_pipeline::config::PublisherConfig;
use blog_pipeline::error::Result;
use std::io::Read;
use std::path::Path;

/// Open the session directory selected by configuration
fn open_session(config: &PublisherConfig) -> Result<FileSession> {
    FileSession::open(config.session_dir())
}

/// Read a post from a file, or stdin for `-`
async fn read_post(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
