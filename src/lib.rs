//! git-whence - Find the merge and pull request a commit came from
//!
//! Given any commit, git-whence finds the merge commit through which it
//! entered the mainline and, on request, opens the pull request behind that
//! merge. Commits that were cherry-picked or rebased onto another branch are
//! matched back to their original by author and subject; squash merges are
//! recognized by their `(#<n>)` marker.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing, reporting and exit codes
//! - [`engine`] - Commit resolution, default branch inference, merge search
//! - [`forge`] - Pull request numbers and web URLs
//! - [`core`] - Domain types and configuration
//! - [`git`] - Single interface for all Git queries
//! - [`ui`] - Output
//!
//! # Invariants
//!
//! 1. The repository is only ever read
//! 2. Commits are handled as full ids and shortened only for display
//! 3. A merge is reported only if the commit it was found for lies on the
//!    side that merge brought in

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod ui;
