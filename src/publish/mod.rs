//! Publish engine
//!
//! Takes the saved post to a pull request in six sequential steps:
//! 1. Resolve the repository's default branch
//! 2. Resolve the default branch's head SHA
//! 3. Create the feature branch (already existing is fine)
//! 4. Probe for an existing file on that branch
//! 5. Create or update the file with the artifact's exact bytes
//! 6. Open the PR (or locate the one already open)

mod progress;
mod workflow;

pub use progress::{BranchStatus, FileStatus, NoopProgress, PrStatus, ProgressCallback, Step};
pub use workflow::{execute_publish, load_post, publish};
