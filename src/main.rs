//! blogpub - write, save, and publish blog posts
//!
//! CLI binary for running the two pipeline stages against a local session.

use anyhow::Result;
use blog_pipeline::config::PublisherConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[derive(Parser)]
#[command(name = "blogpub")]
#[command(about = "Save blog posts and publish them as GitHub pull requests")]
#[command(version)]
struct Cli {
    /// Session directory (defaults to `BLOG_SESSION_DIR`, then the user data dir)
    #[arg(short, long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a post into the session (stage 1)
    Save {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Title (defaults to the frontmatter title)
        #[arg(long)]
        title: Option<String>,

        /// Slug (defaults to the frontmatter slug, then the title)
        #[arg(long)]
        slug: Option<String>,
    },

    /// Publish the saved post as a pull request (stage 2)
    Publish(cli::PublishArgs),

    /// Save a post and publish it
    Run {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Title (defaults to the frontmatter title)
        #[arg(long)]
        title: Option<String>,

        /// Slug (defaults to the frontmatter slug, then the title)
        #[arg(long)]
        slug: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show what is saved in the session
    Status,

    /// Discard the saved post and its state
    Reset,

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Print an agent instruction
    Prompt {
        #[command(subcommand)]
        which: PromptKind,
    },

    /// Inspect or call the agent tools directly
    Tool {
        #[command(subcommand)]
        action: ToolAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[derive(Subcommand)]
enum PromptKind {
    /// Writer agent instruction
    Writer,
    /// Publisher agent instruction, filled from the session
    Publisher,
    /// Instruction shared by all agents
    Global,
}

#[derive(Subcommand)]
enum ToolAction {
    /// List tool declarations as JSON
    List,
    /// Call a tool with JSON arguments
    Call {
        /// Tool name
        name: String,
        /// Arguments as a JSON object
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let mut config = PublisherConfig::from_env()?;
    if let Some(dir) = cli.session {
        config.session_dir = Some(dir);
    }

    match cli.command {
        Commands::Save { file, title, slug } => {
            cli::run_save(&config, &file, title, slug).await?;
        }
        Commands::Publish(args) => {
            cli::run_publish(&config, &args).await?;
        }
        Commands::Run {
            file,
            title,
            slug,
            yes,
        } => {
            cli::run_pipeline(&config, &file, title, slug, yes).await?;
        }
        Commands::Status => {
            cli::run_status(&config).await?;
        }
        Commands::Reset => {
            cli::run_reset(&config)?;
        }
        Commands::Auth { action } => {
            let action_str = match action {
                AuthAction::Test => "test",
                AuthAction::Setup => "setup",
            };
            cli::run_auth(&config, action_str).await?;
        }
        Commands::Prompt { which } => {
            let kind = match which {
                PromptKind::Writer => cli::Prompt::Writer,
                PromptKind::Publisher => cli::Prompt::Publisher,
                PromptKind::Global => cli::Prompt::Global,
            };
            cli::run_prompt(&config, kind)?;
        }
        Commands::Tool { action } => match action {
            ToolAction::List => cli::run_tool_list(&config)?,
            ToolAction::Call { name, args } => cli::run_tool_call(&config, &name, &args).await?,
        },
    }

    Ok(())
}
