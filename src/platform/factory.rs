//! Hosting service factory

use crate::config::PublisherConfig;
use crate::error::Result;
use crate::platform::{GitHubClient, HostingApi};

/// Create the hosting service from configuration
///
/// Resolves auth first, so a missing token fails here with no request made.
pub fn create_hosting_service(config: &PublisherConfig) -> Result<Box<dyn HostingApi>> {
    Ok(Box::new(GitHubClient::new(config)?))
}
