//! CLI progress callback with styled output and spinners

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use blog_pipeline::error::Error;
use blog_pipeline::publish::{BranchStatus, FileStatus, PrStatus, ProgressCallback, Step};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Progress that shows a spinner per step and a line per result
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Progress with no spinner running yet
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn clear_spinner(&self) {
        let running = self.spinner.lock().ok().and_then(|mut slot| slot.take());
        if let Some(pb) = running {
            pb.finish_and_clear();
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_step(&self, step: Step) {
        self.clear_spinner();
        if step == Step::Complete {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_message(format!("{step}..."));
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    async fn on_branch(&self, branch: &str, status: BranchStatus) {
        self.clear_spinner();
        match status {
            BranchStatus::Created => {
                println!("  {} Created branch {}", check(), branch.accent());
            }
            BranchStatus::AlreadyExists => {
                println!(
                    "  {} Branch {} {}",
                    "-".muted(),
                    branch.accent(),
                    "already exists".muted()
                );
            }
        }
    }

    async fn on_file_written(&self, path: &str, status: FileStatus) {
        self.clear_spinner();
        let verb = match status {
            FileStatus::Created => "Created",
            FileStatus::Updated => "Updated",
        };
        println!("  {} {verb} {}", check(), path.accent());
    }

    async fn on_pull_request(&self, url: &str, status: PrStatus) {
        self.clear_spinner();
        let label = match status {
            PrStatus::Created => "Opened pull request",
            PrStatus::Existing => "Found open pull request",
        };
        println!("  {} {label}", check());
        println!("    {}", hyperlink_url(Stream::Stdout, url));
    }

    async fn on_error(&self, err: &Error) {
        self.clear_spinner();
        eprintln!("  {} {}", cross(), err.user_message().error());
    }

    async fn on_message(&self, message: &str) {
        println!("{}", message.muted());
    }
}
