//! blog-pipeline - write a blog post, then publish it as a GitHub PR
//!
//! Two stages share one session: a content producer saves the post as an
//! artifact and records its title/slug, then the publisher pushes that exact
//! artifact to a branch and opens (or finds) the pull request.

pub mod artifact;
pub mod auth;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod pipeline;
pub mod platform;
pub mod prompt;
pub mod publish;
pub mod tools;
pub mod types;
