//! git::gateway
//!
//! The set of version-control queries the merge search consumes.
//!
//! # Design
//!
//! The engine never talks to `git2` directly. It asks questions through the
//! [`VcsGateway`] trait, which [`Git`](super::Git) implements against a real
//! repository and [`MockGateway`](super::mock::MockGateway) answers from a
//! script in unit tests.
//!
//! Every operation returns `Result`. A query that legitimately has no
//! answer returns `Ok` with an empty collection or `None`; only genuine
//! failures (missing refs, corrupt objects, I/O) are `Err`, and callers
//! treat those as fatal.

use crate::core::types::{BranchName, CommitMeta, CommitSummary, LogEntry, Oid, TimeWindow};

use super::GitError;

/// Read-only queries against a version-controlled tree.
pub trait VcsGateway {
    /// Resolve any revision expression (short hash, branch, `HEAD`, `HEAD~2`)
    /// to the full id of the commit it names.
    ///
    /// # Errors
    ///
    /// [`GitError::InvalidCommit`] if the expression does not name a commit.
    fn resolve_commit(&self, reference: &str) -> Result<Oid, GitError>;

    /// Raw commit object text: header lines, a blank line, then the message.
    fn read_raw_commit(&self, oid: &Oid) -> Result<String, GitError>;

    /// Author and subject of a commit.
    fn commit_meta(&self, oid: &Oid) -> Result<CommitMeta, GitError>;

    /// Abbreviated id and subject of a commit.
    fn one_line_summary(&self, oid: &Oid) -> Result<CommitSummary, GitError>;

    /// Merge commits reachable from `to_inclusive` but not from
    /// `from_exclusive` that also descend from `from_exclusive`, newest first.
    fn log_ancestry_merges(
        &self,
        from_exclusive: &Oid,
        to_inclusive: &str,
    ) -> Result<Vec<Oid>, GitError>;

    /// Commits reachable from `to_inclusive` but not from `from_exclusive`.
    fn log_range(&self, from_exclusive: &str, to_inclusive: &str) -> Result<Vec<Oid>, GitError>;

    /// Commits on `branch` whose commit time falls inside `window`, newest first.
    fn log_with_date_window(
        &self,
        branch: &str,
        window: &TimeWindow,
    ) -> Result<Vec<LogEntry>, GitError>;

    /// Local branches, most recently committed first.
    fn list_local_branches_by_recency(&self) -> Result<Vec<BranchName>, GitError>;

    /// Remote-tracking branch names of `remote`, without the remote prefix.
    fn list_remote_tracking_branches(&self, remote: &str) -> Result<Vec<BranchName>, GitError>;

    /// Configured remote names.
    fn list_remotes(&self) -> Result<Vec<String>, GitError>;

    /// The checked-out branch, or `None` when HEAD is detached.
    fn current_branch_name(&self) -> Result<Option<BranchName>, GitError>;

    /// URL of a remote, or `None` if no such remote is configured.
    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError>;
}
