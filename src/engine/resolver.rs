//! engine::resolver
//!
//! Canonicalizes commit references and classifies commits.

use crate::core::types::{CommitSummary, Oid};
use crate::git::{GitError, VcsGateway};

/// Turns user-supplied references into full commit ids.
pub struct CommitResolver<'g> {
    gateway: &'g dyn VcsGateway,
}

impl<'g> CommitResolver<'g> {
    pub fn new(gateway: &'g dyn VcsGateway) -> Self {
        Self { gateway }
    }

    /// Resolve a short hash, branch, `HEAD` or other revision to a full id.
    ///
    /// # Errors
    ///
    /// [`GitError::InvalidCommit`] if the reference names no commit.
    pub fn expand(&self, reference: &str) -> Result<Oid, GitError> {
        self.gateway.resolve_commit(reference)
    }

    /// Whether the commit has two or more parents, read from the raw
    /// object header.
    pub fn is_merge(&self, oid: &Oid) -> Result<bool, GitError> {
        let raw = self.gateway.read_raw_commit(oid)?;
        Ok(count_parents(&raw) >= 2)
    }

    /// One-line summary for display.
    pub fn summary(&self, oid: &Oid) -> Result<CommitSummary, GitError> {
        self.gateway.one_line_summary(oid)
    }
}

/// Number of `parent` lines in a raw commit header.
///
/// Stops at the blank line that separates header from message, so a
/// message line starting with "parent " is not counted.
pub fn count_parents(raw: &str) -> usize {
    raw.lines()
        .take_while(|line| !line.is_empty())
        .filter(|line| line.starts_with("parent "))
        .count()
}
