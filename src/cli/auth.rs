//! Auth command - test and explain authentication

use blog_pipeline::auth::{get_github_auth, test_github_auth};
use blog_pipeline::config::{PublisherConfig, TOKEN_VAR};
use blog_pipeline::error::Result;

/// Run the auth test command
pub async fn run_auth_test(config: &PublisherConfig) -> Result<()> {
    println!("Testing GitHub authentication...");
    let auth = get_github_auth(config)?;
    let username = test_github_auth(&auth).await?;
    println!("Authenticated as: {username}");
    println!("Token source: {:?}", auth.source);
    println!("API: {}", auth.api_url);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("GitHub Authentication Setup");
    println!("===========================");
    println!();
    println!("Create a token with contents and pull request write access:");
    println!("  https://github.com/settings/tokens");
    println!();
    println!("Then set:");
    println!("  {TOKEN_VAR}=<token>");
    println!();
    println!("Optional:");
    println!("  BLOG_REPO_OWNER, BLOG_REPO_NAME, BLOG_CONTENT_PATH");
    println!("  BLOG_GITHUB_API_URL for GitHub Enterprise (https://<host>/api/v3)");
}

/// Wrapper for auth commands
pub async fn run_auth(config: &PublisherConfig, action: &str) -> Result<()> {
    match action {
        "test" => run_auth_test(config).await,
        "setup" => {
            run_auth_setup();
            Ok(())
        }
        _ => {
            println!("Unknown action: {action}. Use 'test' or 'setup'.");
            Ok(())
        }
    }
}
