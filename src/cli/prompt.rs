//! Prompt command - print agent instructions

use crate::cli::open_session;
use blog_pipeline::artifact::{STATE_SLUG, STATE_TITLE, ToolContext};
use blog_pipeline::config::PublisherConfig;
use blog_pipeline::error::{Error, Result};
use blog_pipeline::prompt::{global_instruction_now, publisher_instruction, writer_instruction};

/// Which instruction to print
#[derive(Debug, Clone, Copy)]
pub enum Prompt {
    /// Stage 1
    Writer,
    /// Stage 2, rendered from session state
    Publisher,
    /// Shared preamble
    Global,
}

/// Run the prompt command
pub fn run_prompt(config: &PublisherConfig, which: Prompt) -> Result<()> {
    let text = match which {
        Prompt::Writer => writer_instruction().to_string(),
        Prompt::Global => global_instruction_now(),
        Prompt::Publisher => {
            let session = open_session(config)?;
            let slug = session.get_state(STATE_SLUG)?.ok_or(Error::ContentMissing)?;
            let title = session
                .get_state(STATE_TITLE)?
                .unwrap_or_else(|| slug.clone());
            publisher_instruction(&title, &slug)
        }
    };
    println!("{}", text.trim());
    Ok(())
}
