//! Test data factories for blog-pipeline types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use blog_pipeline::artifact::{BLOG_ARTIFACT_FILENAME, MemorySession, STATE_SLUG, STATE_TITLE, ToolContext};
use blog_pipeline::config::PublisherConfig;
use blog_pipeline::types::PublishRequest;

/// A short post with frontmatter
pub const SAMPLE_POST: &str = "---\ntitle: Test Post\nslug: test\n---\n\n# Test Post\n\nHello.\n";

/// Config with a token and the default repository
pub fn make_config() -> PublisherConfig {
    PublisherConfig {
        token: Some("test-token".to_string()),
        ..PublisherConfig::default()
    }
}

/// Config pointed at a local API server
pub fn make_config_for(api_url: &str) -> PublisherConfig {
    PublisherConfig {
        api_url: api_url.to_string(),
        ..make_config()
    }
}

/// Request for the `test` post (`blog/test`, `test.md`)
pub fn make_request() -> PublishRequest {
    PublishRequest::for_post("Test Post", "test")
}

/// Session holding `content` as the blog artifact
pub async fn make_session_with(content: &str) -> MemorySession {
    let session = MemorySession::new();
    session
        .save_artifact(BLOG_ARTIFACT_FILENAME, content)
        .await
        .unwrap();
    session
}

/// Session as left by the writer for the `test` post
pub async fn make_saved_session() -> MemorySession {
    let session = make_session_with(SAMPLE_POST).await;
    session.set_state(STATE_TITLE, "Test Post").unwrap();
    session.set_state(STATE_SLUG, "test").unwrap();
    session
}
