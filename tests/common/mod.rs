//! Shared test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_hosting;

pub use fixtures::*;
pub use mock_hosting::{Call, MockHostingApi};
