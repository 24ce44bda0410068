//! git::mock
//!
//! Scripted gateway for deterministic testing.
//!
//! # Design
//!
//! `MockGateway` answers [`VcsGateway`] queries from tables filled in by the
//! test. Queries with no scripted answer return the same "no data" result a
//! real repository would (empty lists, `None`), except for commit lookups,
//! which fail like a missing object. Every call is recorded so tests can
//! assert which strategies ran and in what order. A single operation can be
//! configured to fail to exercise error propagation.
//!
//! # Example
//!
//! ```
//! use whence::git::mock::{MockGateway, MockOp};
//! use whence::git::VcsGateway;
//!
//! let gateway = MockGateway::new()
//!     .with_commit(1, 1, "Test User", "xxx", 1_700_000_000)
//!     .with_ref("HEAD", 1);
//!
//! let oid = gateway.resolve_commit("HEAD").unwrap();
//! assert_eq!(oid, MockGateway::oid(1));
//! assert_eq!(gateway.calls(), vec![MockOp::ResolveCommit]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::gateway::VcsGateway;
use super::GitError;
use crate::core::types::{BranchName, CommitMeta, CommitSummary, LogEntry, Oid, TimeWindow};

/// Gateway operations, as recorded by [`MockGateway::calls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    ResolveCommit,
    ReadRawCommit,
    CommitMeta,
    OneLineSummary,
    LogAncestryMerges,
    LogRange,
    LogWithDateWindow,
    ListLocalBranches,
    ListRemoteTrackingBranches,
    ListRemotes,
    CurrentBranchName,
    RemoteUrl,
}

/// A scripted commit.
#[derive(Debug, Clone)]
struct MockCommit {
    parents: usize,
    author: String,
    subject: String,
    time: i64,
}

/// Scripted, in-memory [`VcsGateway`].
#[derive(Debug, Default)]
pub struct MockGateway {
    refs: HashMap<String, Oid>,
    commits: HashMap<Oid, MockCommit>,
    ancestry_merges: HashMap<(Oid, String), Vec<Oid>>,
    ranges: HashMap<(String, String), Vec<Oid>>,
    history: HashMap<String, Vec<Oid>>,
    local_branches: Vec<BranchName>,
    remotes: Vec<(String, Option<String>, Vec<BranchName>)>,
    current_branch: Option<BranchName>,
    fail_on: Option<MockOp>,
    calls: RefCell<Vec<MockOp>>,
}

impl MockGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic full-length id for test commit number `n`.
    pub fn oid(n: u32) -> Oid {
        Oid::new(format!("{:040x}", n)).expect("40 hex digits")
    }

    /// Add a commit with `parents` parents.
    pub fn with_commit(
        mut self,
        n: u32,
        parents: usize,
        author: &str,
        subject: &str,
        time: i64,
    ) -> Self {
        self.commits.insert(
            Self::oid(n),
            MockCommit {
                parents,
                author: author.to_string(),
                subject: subject.to_string(),
                time,
            },
        );
        self
    }

    /// Make `reference` resolve to commit `n`.
    pub fn with_ref(mut self, reference: &str, n: u32) -> Self {
        self.refs.insert(reference.to_string(), Self::oid(n));
        self
    }

    /// Script the answer of `log_ancestry_merges(from, branch)`.
    pub fn with_ancestry_merges(mut self, from: u32, branch: &str, merges: &[u32]) -> Self {
        self.ancestry_merges.insert(
            (Self::oid(from), branch.to_string()),
            merges.iter().map(|n| Self::oid(*n)).collect(),
        );
        self
    }

    /// Script the contents of `merge^..merge`.
    pub fn with_merge_range(mut self, merge: u32, commits: &[u32]) -> Self {
        let merge = Self::oid(merge);
        self.ranges.insert(
            (format!("{}^", merge), merge.to_string()),
            commits.iter().map(|n| Self::oid(*n)).collect(),
        );
        self
    }

    /// Script the history of `branch`, newest first. Window filtering uses
    /// each commit's scripted time.
    pub fn with_history(mut self, branch: &str, commits: &[u32]) -> Self {
        self.history.insert(
            branch.to_string(),
            commits.iter().map(|n| Self::oid(*n)).collect(),
        );
        self
    }

    /// Local branches, most recent first.
    pub fn with_local_branches(mut self, names: &[&str]) -> Self {
        self.local_branches = names.iter().map(|n| branch(n)).collect();
        self
    }

    /// Add a remote with its tracking branches.
    pub fn with_remote(mut self, name: &str, url: Option<&str>, branches: &[&str]) -> Self {
        self.remotes.push((
            name.to_string(),
            url.map(String::from),
            branches.iter().map(|n| branch(n)).collect(),
        ));
        self
    }

    /// Set the checked-out branch.
    pub fn with_current_branch(mut self, name: &str) -> Self {
        self.current_branch = Some(branch(name));
        self
    }

    /// Fail every call of `op` with an internal error.
    pub fn failing_on(mut self, op: MockOp) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Operations invoked so far, in order.
    pub fn calls(&self) -> Vec<MockOp> {
        self.calls.borrow().clone()
    }

    /// Number of times `op` was invoked.
    pub fn call_count(&self, op: MockOp) -> usize {
        self.calls.borrow().iter().filter(|c| **c == op).count()
    }

    fn record(&self, op: MockOp) -> Result<(), GitError> {
        self.calls.borrow_mut().push(op);
        if self.fail_on == Some(op) {
            return Err(GitError::Internal {
                message: format!("injected failure in {:?}", op),
            });
        }
        Ok(())
    }

    fn commit(&self, oid: &Oid) -> Result<&MockCommit, GitError> {
        self.commits.get(oid).ok_or_else(|| GitError::ObjectNotFound {
            oid: oid.to_string(),
        })
    }
}

fn branch(name: &str) -> BranchName {
    BranchName::new(name).expect("valid branch name")
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

impl VcsGateway for MockGateway {
    fn resolve_commit(&self, reference: &str) -> Result<Oid, GitError> {
        self.record(MockOp::ResolveCommit)?;
        if let Some(oid) = self.refs.get(reference) {
            return Ok(oid.clone());
        }
        match Oid::new(reference) {
            Ok(oid) if self.commits.contains_key(&oid) => Ok(oid),
            _ => Err(GitError::InvalidCommit {
                reference: reference.to_string(),
            }),
        }
    }

    fn read_raw_commit(&self, oid: &Oid) -> Result<String, GitError> {
        self.record(MockOp::ReadRawCommit)?;
        let commit = self.commit(oid)?;

        let mut raw = format!("tree {}\n", Self::oid(0));
        for i in 0..commit.parents {
            raw.push_str(&format!("parent {}\n", Self::oid(1000 + i as u32)));
        }
        raw.push_str(&format!(
            "author {a} <a@example.com> {t} +0000\ncommitter {a} <a@example.com> {t} +0000\n\n{s}\n",
            a = commit.author,
            t = commit.time,
            s = commit.subject,
        ));
        Ok(raw)
    }

    fn commit_meta(&self, oid: &Oid) -> Result<CommitMeta, GitError> {
        self.record(MockOp::CommitMeta)?;
        let commit = self.commit(oid)?;
        Ok(CommitMeta {
            oid: oid.clone(),
            author_name: commit.author.clone(),
            author_time: timestamp(commit.time),
            subject: commit.subject.clone(),
        })
    }

    fn one_line_summary(&self, oid: &Oid) -> Result<CommitSummary, GitError> {
        self.record(MockOp::OneLineSummary)?;
        let commit = self.commit(oid)?;
        Ok(CommitSummary {
            oid: oid.clone(),
            short_id: oid.short(7).to_string(),
            subject: commit.subject.clone(),
        })
    }

    fn log_ancestry_merges(
        &self,
        from_exclusive: &Oid,
        to_inclusive: &str,
    ) -> Result<Vec<Oid>, GitError> {
        self.record(MockOp::LogAncestryMerges)?;
        Ok(self
            .ancestry_merges
            .get(&(from_exclusive.clone(), to_inclusive.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn log_range(&self, from_exclusive: &str, to_inclusive: &str) -> Result<Vec<Oid>, GitError> {
        self.record(MockOp::LogRange)?;
        Ok(self
            .ranges
            .get(&(from_exclusive.to_string(), to_inclusive.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn log_with_date_window(
        &self,
        branch: &str,
        window: &TimeWindow,
    ) -> Result<Vec<LogEntry>, GitError> {
        self.record(MockOp::LogWithDateWindow)?;
        let Some(history) = self.history.get(branch) else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for oid in history {
            let commit = self.commit(oid)?;
            if window.contains(timestamp(commit.time)) {
                entries.push(LogEntry {
                    oid: oid.clone(),
                    author_name: commit.author.clone(),
                    subject: commit.subject.clone(),
                });
            }
        }
        Ok(entries)
    }

    fn list_local_branches_by_recency(&self) -> Result<Vec<BranchName>, GitError> {
        self.record(MockOp::ListLocalBranches)?;
        Ok(self.local_branches.clone())
    }

    fn list_remote_tracking_branches(&self, remote: &str) -> Result<Vec<BranchName>, GitError> {
        self.record(MockOp::ListRemoteTrackingBranches)?;
        Ok(self
            .remotes
            .iter()
            .find(|(name, _, _)| name == remote)
            .map(|(_, _, branches)| branches.clone())
            .unwrap_or_default())
    }

    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        self.record(MockOp::ListRemotes)?;
        Ok(self.remotes.iter().map(|(name, _, _)| name.clone()).collect())
    }

    fn current_branch_name(&self) -> Result<Option<BranchName>, GitError> {
        self.record(MockOp::CurrentBranchName)?;
        Ok(self.current_branch.clone())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        self.record(MockOp::RemoteUrl)?;
        Ok(self
            .remotes
            .iter()
            .find(|(name, _, _)| name == remote)
            .and_then(|(_, url, _)| url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_queries_return_no_data() {
        let gateway = MockGateway::new();
        let window = TimeWindow::around(timestamp(0), 30);

        assert!(gateway
            .log_ancestry_merges(&MockGateway::oid(1), "HEAD")
            .unwrap()
            .is_empty());
        assert!(gateway.log_range("a^", "a").unwrap().is_empty());
        assert!(gateway.log_with_date_window("main", &window).unwrap().is_empty());
        assert!(gateway.list_remotes().unwrap().is_empty());
        assert!(gateway.current_branch_name().unwrap().is_none());
        assert!(gateway.remote_url("origin").unwrap().is_none());
    }

    #[test]
    fn unknown_reference_is_invalid_commit() {
        let gateway = MockGateway::new();
        assert!(matches!(
            gateway.resolve_commit("1231231231"),
            Err(GitError::InvalidCommit { .. })
        ));
    }

    #[test]
    fn raw_commit_lists_one_parent_line_per_parent() {
        let gateway = MockGateway::new().with_commit(7, 2, "Test User", "Merge", 0);
        let raw = gateway.read_raw_commit(&MockGateway::oid(7)).unwrap();
        assert_eq!(raw.lines().filter(|l| l.starts_with("parent ")).count(), 2);
    }

    #[test]
    fn injected_failure_is_recorded() {
        let gateway = MockGateway::new().failing_on(MockOp::ListRemotes);
        assert!(gateway.list_remotes().is_err());
        assert_eq!(gateway.call_count(MockOp::ListRemotes), 1);
    }

    #[test]
    fn window_filters_history() {
        let gateway = MockGateway::new()
            .with_commit(1, 1, "A", "old", 0)
            .with_commit(2, 1, "A", "new", 100 * 86_400)
            .with_history("main", &[2, 1]);

        let window = TimeWindow::around(timestamp(100 * 86_400), 30);
        let entries = gateway.log_with_date_window("main", &window).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "new");
    }
}
