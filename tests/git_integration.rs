//! Integration tests for the Git gateway.
//!
//! These tests use real git repositories created via tempfile to verify
//! that every gateway query answers correctly against actual git history.

use std::path::Path;
use std::process::Command;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use whence::core::types::{Oid, TimeWindow};
use whence::git::{Git, GitError, VcsGateway};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on master.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "master"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        std::fs::write(dir.path().join("xxx"), "xxx\n").unwrap();
        run_git(dir.path(), &["add", "-A"]);
        run_git(dir.path(), &["commit", "-m", "initial"]);

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Append to `xxx` and commit, returning the new commit id.
    fn commit(&self, message: &str) -> Oid {
        let file = self.path().join("xxx");
        let mut content = std::fs::read_to_string(&file).unwrap();
        content.push_str(message);
        content.push('\n');
        std::fs::write(&file, content).unwrap();
        run_git(self.path(), &["commit", "-am", message]);
        self.rev_parse("HEAD")
    }

    /// Commit on a new `branch` and merge it into `base` with `--no-ff`.
    /// Returns (merge, commit).
    fn add_merge(&self, branch: &str, base: &str) -> (Oid, Oid) {
        run_git(self.path(), &["checkout", "-b", branch]);
        let commit = self.commit("xxx");
        run_git(self.path(), &["checkout", base]);
        run_git(self.path(), &["merge", "--no-ff", "--no-edit", branch]);
        (self.rev_parse("HEAD"), commit)
    }

    fn rev_parse(&self, rev: &str) -> Oid {
        let output = Command::new("git")
            .args(["rev-parse", rev])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        Oid::new(String::from_utf8(output.stdout).unwrap().trim()).unwrap()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================================
// Repository Opening Tests
// =============================================================================

#[test]
fn open_valid_repository() {
    let repo = TestRepo::new();
    assert!(Git::open(repo.path()).is_ok());
}

#[test]
fn open_from_subdirectory() {
    let repo = TestRepo::new();
    let subdir = repo.path().join("subdir");
    std::fs::create_dir(&subdir).unwrap();

    assert!(Git::open(&subdir).is_ok());
}

#[test]
fn open_non_repository_fails() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Git::open(dir.path()),
        Err(GitError::NotARepo { .. })
    ));
}

#[test]
fn git_dir_points_at_dot_git() {
    let repo = TestRepo::new();
    assert!(repo.git().git_dir().ends_with(".git"));
}

// =============================================================================
// Commit Resolution Tests
// =============================================================================

#[test]
fn resolve_short_hash_to_full_id() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");

    let resolved = repo.git().resolve_commit(head.short(6)).unwrap();
    assert_eq!(resolved, head);
    assert_eq!(resolved.as_str().len(), 40);
}

#[test]
fn resolve_symbolic_references() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");
    let git = repo.git();

    assert_eq!(git.resolve_commit("HEAD").unwrap(), head);
    assert_eq!(git.resolve_commit("master").unwrap(), head);
}

#[test]
fn resolve_unknown_revision_fails() {
    let repo = TestRepo::new();
    let err = repo.git().resolve_commit("1231231231").unwrap_err();

    assert!(matches!(err, GitError::InvalidCommit { .. }));
    assert!(err
        .to_string()
        .contains("unknown revision or path not in the working tree"));
}

// =============================================================================
// Commit Inspection Tests
// =============================================================================

#[test]
fn raw_merge_commit_has_two_parent_lines() {
    let repo = TestRepo::new();
    let (merge, commit) = repo.add_merge("foobar", "master");
    let git = repo.git();

    let count = |raw: String| raw.lines().filter(|l| l.starts_with("parent ")).count();
    assert_eq!(count(git.read_raw_commit(&merge).unwrap()), 2);
    assert_eq!(count(git.read_raw_commit(&commit).unwrap()), 1);
}

#[test]
fn commit_meta_reports_author_and_subject() {
    let repo = TestRepo::new();
    let oid = repo.commit("second");

    let meta = repo.git().commit_meta(&oid).unwrap();
    assert_eq!(meta.oid, oid);
    assert_eq!(meta.author_name, "Test User");
    assert_eq!(meta.subject, "second");
    assert_eq!(meta.match_key(), ("Test User", "second"));
}

#[test]
fn one_line_summary_uses_short_id() {
    let repo = TestRepo::new();
    let (merge, _) = repo.add_merge("foobar", "master");

    let summary = repo.git().one_line_summary(&merge).unwrap();
    assert_eq!(summary.short_id, merge.short(7));
    assert_eq!(summary.subject, "Merge branch 'foobar'");
    assert_eq!(
        summary.to_string(),
        format!("{} Merge branch 'foobar'", merge.short(7))
    );
}

// =============================================================================
// History Query Tests
// =============================================================================

#[test]
fn ancestry_merges_towards_head() {
    let repo = TestRepo::new();
    let (merge, commit) = repo.add_merge("foobar", "master");

    let merges = repo.git().log_ancestry_merges(&commit, "HEAD").unwrap();
    assert_eq!(merges, vec![merge]);
}

#[test]
fn ancestry_merges_newest_first() {
    let repo = TestRepo::new();
    let (first, commit) = repo.add_merge("foobar", "master");
    run_git(repo.path(), &["checkout", "-b", "outer", "foobar"]);
    run_git(repo.path(), &["merge", "--no-ff", "--no-edit", "master"]);
    let outer = repo.rev_parse("HEAD");
    run_git(repo.path(), &["checkout", "master"]);
    run_git(repo.path(), &["merge", "--no-ff", "--no-edit", "outer"]);
    let last = repo.rev_parse("HEAD");

    let merges = repo.git().log_ancestry_merges(&commit, "HEAD").unwrap();
    assert_eq!(merges.first(), Some(&last));
    assert!(merges.contains(&outer));
    assert!(merges.contains(&first));
}

#[test]
fn ancestry_merges_empty_when_unrelated() {
    let repo = TestRepo::new();
    let (_, commit) = repo.add_merge("foobar", "master");
    run_git(repo.path(), &["checkout", "-b", "side", "HEAD~1"]);

    let merges = repo.git().log_ancestry_merges(&commit, "side").unwrap();
    assert!(merges.is_empty());
}

#[test]
fn merged_range_contains_second_parent_side() {
    let repo = TestRepo::new();
    let mainline = repo.rev_parse("HEAD");
    let (merge, commit) = repo.add_merge("foobar", "master");
    let git = repo.git();

    let range = git
        .log_range(&format!("{}^", merge), merge.as_str())
        .unwrap();
    assert!(range.contains(&merge));
    assert!(range.contains(&commit));
    assert!(!range.contains(&mainline));
}

#[test]
fn log_range_with_missing_bound_is_ref_not_found() {
    let repo = TestRepo::new();
    assert!(matches!(
        repo.git().log_range("nope", "HEAD"),
        Err(GitError::RefNotFound { .. })
    ));
}

#[test]
fn date_window_filters_by_commit_time() {
    let repo = TestRepo::new();
    repo.commit("second");
    let git = repo.git();

    let now = TimeWindow::around(Utc::now(), 1);
    let entries = git.log_with_date_window("master", &now).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].subject, "second");
    assert_eq!(entries[0].author_name, "Test User");

    let long_ago = TimeWindow::around(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(), 30);
    assert!(git
        .log_with_date_window("master", &long_ago)
        .unwrap()
        .is_empty());
}

// =============================================================================
// Branch and Remote Tests
// =============================================================================

#[test]
fn local_branches_listed() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["branch", "production"]);

    let names: Vec<String> = repo
        .git()
        .list_local_branches_by_recency()
        .unwrap()
        .into_iter()
        .map(|b| b.to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"master".to_string()));
    assert!(names.contains(&"production".to_string()));
}

#[test]
fn remote_tracking_branches_skip_head() {
    let repo = TestRepo::new();
    run_git(
        repo.path(),
        &["remote", "add", "origin", "git@github.com:foobar/barbaz.git"],
    );
    run_git(repo.path(), &["update-ref", "refs/remotes/origin/main", "HEAD"]);
    run_git(
        repo.path(),
        &["symbolic-ref", "refs/remotes/origin/HEAD", "refs/remotes/origin/main"],
    );
    let git = repo.git();

    let names = git.list_remote_tracking_branches("origin").unwrap();
    assert_eq!(
        names.iter().map(|b| b.as_str()).collect::<Vec<_>>(),
        vec!["main"]
    );
    assert_eq!(git.list_remotes().unwrap(), vec!["origin".to_string()]);
    assert_eq!(
        git.remote_url("origin").unwrap().as_deref(),
        Some("git@github.com:foobar/barbaz.git")
    );
}

#[test]
fn missing_remote_url_is_none() {
    let repo = TestRepo::new();
    assert_eq!(repo.git().remote_url("origin").unwrap(), None);
}

#[test]
fn current_branch_and_detached_head() {
    let repo = TestRepo::new();
    assert_eq!(
        repo.git().current_branch_name().unwrap().unwrap().as_str(),
        "master"
    );

    run_git(repo.path(), &["checkout", "--detach"]);
    assert_eq!(repo.git().current_branch_name().unwrap(), None);
}
