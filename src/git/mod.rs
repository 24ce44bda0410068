//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through the [`VcsGateway`] trait. No other module should import `git2`,
//! and nothing in git-whence shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Revision resolution and raw object reads
//! - Ancestry and range queries (merge search, range membership)
//! - Branch and remote enumeration
//!
//! # Invariants
//!
//! - Every query is read-only
//! - An empty answer is `Ok`, never an error
//! - All operations return strong types (Oid, BranchName)
//!
//! # Example
//!
//! ```ignore
//! use whence::git::{Git, VcsGateway};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.resolve_commit("HEAD")?;
//! let merges = git.log_ancestry_merges(&head, "main")?;
//! ```

mod gateway;
mod interface;
pub mod mock;

pub use gateway::VcsGateway;
pub use interface::{Git, GitError};
