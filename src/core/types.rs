//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`Oid`] - Git object identifier (SHA), always full length
//! - [`CommitSummary`] - Full id, short id and subject of one commit
//! - [`CommitMeta`] - Author and subject data used for fuzzy matching
//! - [`LogEntry`] - One row of a windowed history listing
//! - [`TimeWindow`] - Inclusive interval around a timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use whence::core::types::{BranchName, Oid};
//!
//! // Valid constructions
//! let branch = BranchName::new("feature/my-branch").unwrap();
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(Oid::new("abc123").is_err());
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A validated Git branch name.
///
/// Branch names must conform to Git's refname rules (see `git check-ref-format`):
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
/// - Cannot be exactly `@`
///
/// # Example
///
/// ```
/// use whence::core::types::BranchName;
///
/// let name = BranchName::new("main").unwrap();
/// assert_eq!(name.as_str(), "main");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }

        if name == "@" {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be '@' (reserved)".into(),
            ));
        }

        if name.starts_with('.') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '.'".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }

        if name.ends_with(".lock") {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot end with '.lock'".into(),
            ));
        }
        if name.ends_with('/') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot end with '/'".into(),
            ));
        }

        for forbidden in ["..", "@{", "//"] {
            if name.contains(forbidden) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{forbidden}'"
                )));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        for c in INVALID_CHARS {
            if name.contains(c) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{c}'"
                )));
            }
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot contain control characters".into(),
            ));
        }

        for component in name.split('/').filter(|c| !c.is_empty()) {
            if component.starts_with('.') {
                return Err(TypeError::InvalidBranchName(
                    "path component cannot start with '.'".into(),
                ));
            }
            if component.ends_with(".lock") {
                return Err(TypeError::InvalidBranchName(
                    "path component cannot end with '.lock'".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A full Git object identifier (SHA-1 or SHA-256).
///
/// Abbreviated hashes and symbolic names never reach this type; they are
/// expanded by the resolver first. OIDs are normalized to lowercase.
///
/// # Example
///
/// ```
/// use whence::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a full hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-line description of a commit.
///
/// The full id is kept for any further lookups; the short id (as abbreviated
/// by the repository) is only used for display.
///
/// # Example
///
/// ```
/// use whence::core::types::{CommitSummary, Oid};
///
/// let summary = CommitSummary {
///     oid: Oid::new("abc123def4567890abc123def4567890abc12345").unwrap(),
///     short_id: "abc123d".to_string(),
///     subject: "Merge branch 'foobar'".to_string(),
/// };
/// assert_eq!(summary.to_string(), "abc123d Merge branch 'foobar'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Full object id
    pub oid: Oid,
    /// Abbreviated id, unique within the repository
    pub short_id: String,
    /// First line of the commit message
    pub subject: String,
}

impl std::fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.short_id, self.subject)
    }
}

/// Author and subject of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    pub oid: Oid,
    pub author_name: String,
    pub author_time: DateTime<Utc>,
    pub subject: String,
}

impl CommitMeta {
    /// Key used to recognize the same change under a different hash.
    ///
    /// Author and subject are kept apart so that neither can absorb words
    /// from the other.
    pub fn match_key(&self) -> (&str, &str) {
        (&self.author_name, &self.subject)
    }
}

/// A commit as listed by a windowed history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub oid: Oid,
    pub author_name: String,
    pub subject: String,
}

impl LogEntry {
    /// Same shape as [`CommitMeta::match_key`].
    pub fn match_key(&self) -> (&str, &str) {
        (&self.author_name, &self.subject)
    }
}

/// Inclusive time interval centered on a timestamp.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use whence::core::types::TimeWindow;
///
/// let center = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// let window = TimeWindow::around(center, 30);
///
/// assert!(window.contains(center + Duration::days(30)));
/// assert!(!window.contains(center - Duration::days(31)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window of `days` on either side of `center`.
    pub fn around(center: DateTime<Utc>, days: u32) -> Self {
        let half = Duration::days(i64::from(days));
        Self {
            after: center - half,
            before: center + half,
        }
    }

    /// Whether `ts` lies within the window (both ends inclusive).
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.after <= ts && ts <= self.before
    }
}
