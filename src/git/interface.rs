//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! git-whence. All repository reads flow through [`Git`], which implements
//! [`VcsGateway`] and normalizes errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::InvalidCommit`]: A user-supplied revision does not name a commit
//! - [`GitError::RefNotFound`]: A branch or ref the search needs is missing
//! - [`GitError::RemoteNotFound`]: A required remote is not configured
//!
//! # Example
//!
//! ```ignore
//! use whence::git::{Git, VcsGateway};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let oid = git.resolve_commit("HEAD")?;
//! println!("HEAD is at {}", oid.short(7));
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::gateway::VcsGateway;
use crate::core::types::{
    BranchName, CommitMeta, CommitSummary, LogEntry, Oid, TimeWindow, TypeError,
};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// A revision supplied by the user does not resolve to a commit.
    #[error("ambiguous argument '{reference}': unknown revision or path not in the working tree")]
    InvalidCommit {
        /// The revision as given
        reference: String,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Remote is not configured.
    #[error("No such remote '{name}'")]
    RemoteNotFound {
        /// The remote that was looked up
        name: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.contains('/') || context == "HEAD" {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) => GitError::Internal { message: msg },
        }
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2`. All access is read-only.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository. Bare
    /// repositories are accepted; the search never needs a working tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    fn find_commit(&self, oid: &Oid) -> Result<git2::Commit<'_>, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        self.repo
            .find_commit(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))
    }

    /// Peel a revision expression used as a search bound.
    ///
    /// Unlike [`VcsGateway::resolve_commit`], failures here are internal
    /// (the engine chose the revision) and surface as `RefNotFound`.
    fn peel_revision(&self, revision: &str) -> Result<git2::Oid, GitError> {
        let object = self.repo.revparse_single(revision).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: revision.to_string(),
            },
            _ => GitError::from_git2(e, revision),
        })?;

        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, revision))?;

        Ok(commit.id())
    }

    fn revwalk(&self) -> Result<git2::Revwalk<'_>, GitError> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        Ok(walk)
    }

    fn to_oid(id: git2::Oid) -> Result<Oid, GitError> {
        Oid::new(id.to_string()).map_err(|e| e.into())
    }
}

impl VcsGateway for Git {
    fn resolve_commit(&self, reference: &str) -> Result<Oid, GitError> {
        let invalid = || GitError::InvalidCommit {
            reference: reference.to_string(),
        };

        let object = self.repo.revparse_single(reference).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::InvalidSpec
            | git2::ErrorCode::Ambiguous
            | git2::ErrorCode::UnbornBranch => invalid(),
            _ => GitError::from_git2(e, reference),
        })?;

        let commit = object.peel_to_commit().map_err(|_| invalid())?;
        Self::to_oid(commit.id())
    }

    fn read_raw_commit(&self, oid: &Oid) -> Result<String, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let odb = self.repo.odb()?;
        let object = odb
            .read(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        Ok(String::from_utf8_lossy(object.data()).into_owned())
    }

    fn commit_meta(&self, oid: &Oid) -> Result<CommitMeta, GitError> {
        let commit = self.find_commit(oid)?;

        let author = commit.author();
        let author_time = chrono::DateTime::from_timestamp(author.when().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);

        Ok(CommitMeta {
            oid: oid.clone(),
            author_name: author.name().unwrap_or("").to_string(),
            author_time,
            subject: commit.summary().unwrap_or("").to_string(),
        })
    }

    fn one_line_summary(&self, oid: &Oid) -> Result<CommitSummary, GitError> {
        let commit = self.find_commit(oid)?;

        let short = commit.as_object().short_id()?;
        let short_id = short
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| oid.short(7).to_string());

        Ok(CommitSummary {
            oid: oid.clone(),
            short_id,
            subject: commit.summary().unwrap_or("").to_string(),
        })
    }

    fn log_ancestry_merges(
        &self,
        from_exclusive: &Oid,
        to_inclusive: &str,
    ) -> Result<Vec<Oid>, GitError> {
        let base = self.find_commit(from_exclusive)?.id();
        let tip = self.peel_revision(to_inclusive)?;

        let mut walk = self.revwalk()?;
        walk.push(tip)?;
        walk.hide(base)?;

        let mut merges = Vec::new();
        for id in walk {
            let id = id?;
            let commit = self.repo.find_commit(id)?;
            if commit.parent_count() < 2 {
                continue;
            }
            // Ancestry path: only commits that descend from the base
            if !self.repo.graph_descendant_of(id, base)? {
                continue;
            }
            merges.push(Self::to_oid(id)?);
        }

        Ok(merges)
    }

    fn log_range(&self, from_exclusive: &str, to_inclusive: &str) -> Result<Vec<Oid>, GitError> {
        let hidden = self.peel_revision(from_exclusive)?;
        let tip = self.peel_revision(to_inclusive)?;

        let mut walk = self.revwalk()?;
        walk.push(tip)?;
        walk.hide(hidden)?;

        walk.map(|id| Self::to_oid(id?)).collect()
    }

    fn log_with_date_window(
        &self,
        branch: &str,
        window: &TimeWindow,
    ) -> Result<Vec<LogEntry>, GitError> {
        let tip = self.peel_revision(branch)?;
        let after = window.after.timestamp();
        let before = window.before.timestamp();

        let mut walk = self.revwalk()?;
        walk.push(tip)?;

        let mut entries = Vec::new();
        for id in walk {
            let commit = self.repo.find_commit(id?)?;
            let committed = commit.time().seconds();
            if committed < after || committed > before {
                continue;
            }
            entries.push(LogEntry {
                oid: Self::to_oid(commit.id())?,
                author_name: commit.author().name().unwrap_or("").to_string(),
                subject: commit.summary().unwrap_or("").to_string(),
            });
        }

        Ok(entries)
    }

    fn list_local_branches_by_recency(&self) -> Result<Vec<BranchName>, GitError> {
        let mut dated = Vec::new();
        for branch in self.repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = branch?;
            let Some(name) = branch.name().ok().flatten() else {
                continue; // Non-UTF8 names
            };
            let Ok(name) = BranchName::new(name) else {
                continue;
            };
            let Ok(commit) = branch.get().peel_to_commit() else {
                continue;
            };
            dated.push((commit.time().seconds(), name));
        }

        // Newest first, ties by name
        dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Ok(dated.into_iter().map(|(_, name)| name).collect())
    }

    fn list_remote_tracking_branches(&self, remote: &str) -> Result<Vec<BranchName>, GitError> {
        let prefix = format!("{}/", remote);

        let mut names = Vec::new();
        for branch in self.repo.branches(Some(git2::BranchType::Remote))? {
            let (branch, _) = branch?;
            let Some(full) = branch.name().ok().flatten() else {
                continue;
            };
            let Some(short) = full.strip_prefix(&prefix) else {
                continue;
            };
            if short == "HEAD" {
                continue;
            }
            if let Ok(name) = BranchName::new(short) {
                names.push(name);
            }
        }

        Ok(names)
    }

    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn current_branch_name(&self) -> Result<Option<BranchName>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(BranchName::new(name)?));
            }
        }

        Ok(None) // Detached HEAD
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(remote) {
            Ok(found) => Ok(found.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Internal {
                message: e.message().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn invalid_commit_mentions_unknown_revision() {
            let err = GitError::InvalidCommit {
                reference: "1231231231".to_string(),
            };
            let message = err.to_string();
            assert!(message.contains("1231231231"));
            assert!(message.contains("unknown revision or path not in the working tree"));
        }

        #[test]
        fn remote_not_found_names_remote() {
            let err = GitError::RemoteNotFound {
                name: "origin".to_string(),
            };
            assert_eq!(err.to_string(), "No such remote 'origin'");
        }

        #[test]
        fn type_error_converts() {
            let err: GitError = TypeError::InvalidOid("bad".to_string()).into();
            assert!(matches!(err, GitError::InvalidOid { .. }));
        }

        #[test]
        fn not_found_context_picks_variant() {
            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Reference,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "origin/main"),
                GitError::RefNotFound { .. }
            ));

            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Odb,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "abc123"),
                GitError::ObjectNotFound { .. }
            ));
        }
    }
}
