//! Response classification for idempotent creates
//!
//! The API reports "already there" only through a 422 whose body carries a
//! fixed phrase. Those substring rules live here, apart from sequencing.

/// Outcome of a create call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Resource was created
    Created,
    /// Resource existed already; treat as satisfied
    AlreadyExists,
    /// Anything else
    Failed,
}

/// Phrase in a 422 body when the ref already exists
pub const REF_EXISTS_MARKER: &str = "already exists";

/// Phrase in a 422 body when a PR for the head already exists
pub const PR_EXISTS_MARKER: &str = "A pull request already exists";

const CREATED: u16 = 201;
const UNPROCESSABLE: u16 = 422;

fn classify_create(status: u16, body: &str, marker: &str) -> CreateOutcome {
    match status {
        CREATED => CreateOutcome::Created,
        UNPROCESSABLE if body.contains(marker) => CreateOutcome::AlreadyExists,
        _ => CreateOutcome::Failed,
    }
}

/// Classify `POST /git/refs`
pub fn classify_ref_create(status: u16, body: &str) -> CreateOutcome {
    classify_create(status, body, REF_EXISTS_MARKER)
}

/// Classify `POST /pulls`
pub fn classify_pull_create(status: u16, body: &str) -> CreateOutcome {
    classify_create(status, body, PR_EXISTS_MARKER)
}

/// Whether a contents probe found a file; any other status means "create"
pub const fn file_probe_found(status: u16) -> bool {
    status == 200
}

/// Whether `PUT /contents` created or updated the file
pub const fn file_write_succeeded(status: u16) -> bool {
    matches!(status, 200 | 201)
}
