//! forge::pull_request
//!
//! Pull request numbers recovered from commit subjects.
//!
//! Two subject shapes are recognized, tried in order:
//!
//! 1. A merge commit created by the hosting service:
//!    `Merge pull request #10486 from foo/baz`
//! 2. A squash merge, which keeps the PR number as a trailing marker:
//!    `Fix the widget (#123)`
//!
//! # Example
//!
//! ```
//! use whence::forge::pull_request::extract;
//!
//! assert_eq!(extract("Merge pull request #10486 from foo/baz"), Some(10486));
//! assert_eq!(extract("foo (#123)"), Some(123));
//! assert_eq!(extract("unrelated message"), None);
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Subject of a merge commit created by the hosting service.
pub const MERGE_PR_PATTERN: &str = r"Merge pull request #(\d+) from ";

/// Trailing PR marker left by a squash merge.
pub const SQUASH_PATTERN: &str = r"\(#(\d+)\)$";

fn merge_pr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MERGE_PR_PATTERN).expect("valid merge PR pattern"))
}

fn squash_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SQUASH_PATTERN).expect("valid squash pattern"))
}

fn capture_number(re: &Regex, subject: &str) -> Option<u64> {
    re.captures(subject)?.get(1)?.as_str().parse().ok()
}

/// Extract a PR number from a commit subject.
///
/// The merge form wins over the squash form when both are present.
/// Numbers too large for `u64` are treated as absent.
pub fn extract(subject: &str) -> Option<u64> {
    capture_number(merge_pr_regex(), subject).or_else(|| squash_number(subject))
}

/// PR number from a trailing squash marker only.
pub fn squash_number(subject: &str) -> Option<u64> {
    capture_number(squash_regex(), subject)
}

/// Whether a subject ends in a squash-merge marker.
pub fn has_squash_marker(subject: &str) -> bool {
    squash_regex().is_match(subject)
}

/// A pull request on a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReference {
    /// `owner/repo`
    pub slug: String,
    pub number: u64,
}
