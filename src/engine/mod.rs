//! engine
//!
//! Traces a commit back to the merge that introduced it.
//!
//! # Architecture
//!
//! One invocation flows through three components, all reading the
//! repository through a [`VcsGateway`]:
//!
//! ```text
//! CommitResolver::expand -> CommitResolver::is_merge -> MergeLocator::find
//! ```
//!
//! - [`resolver`]: reference canonicalization and merge classification
//! - [`branch`]: default branch inference
//! - [`locator`]: the ordered merge search with validation
//!
//! Shared per-invocation state lives in [`Context`]. Nothing outlives it.
//!
//! # Example
//!
//! ```
//! use whence::core::config::Config;
//! use whence::engine::{trace, Context, Resolution};
//! use whence::git::mock::MockGateway;
//! use whence::ui::output::Verbosity;
//!
//! let gateway = MockGateway::new()
//!     .with_commit(1, 2, "Test User", "Merge branch 'foobar'", 1_700_000_000)
//!     .with_ref("HEAD", 1);
//! let ctx = Context::new(&gateway, Config::default(), Verbosity::Quiet);
//!
//! assert!(matches!(
//!     trace(&ctx, "HEAD").unwrap(),
//!     Resolution::CommitIsMerge { .. }
//! ));
//! ```

pub mod branch;
pub mod locator;
pub mod resolver;

pub use branch::{DefaultBranch, DefaultBranchDetector, DetectionSource};
pub use locator::{MergeCandidate, MergeLocator, MergeOutcome, Strategy};
pub use resolver::CommitResolver;

use std::cell::OnceCell;

use crate::core::config::Config;
use crate::core::types::Oid;
use crate::git::{GitError, VcsGateway};
use crate::ui::output::{self, Verbosity};

/// Per-invocation state shared by the engine components.
pub struct Context<'g> {
    /// Repository access
    pub gateway: &'g dyn VcsGateway,
    /// Merged global and repo configuration
    pub config: Config,
    /// Output verbosity for debug traces
    pub verbosity: Verbosity,
    default_branch: OnceCell<DefaultBranch>,
}

impl<'g> Context<'g> {
    pub fn new(gateway: &'g dyn VcsGateway, config: Config, verbosity: Verbosity) -> Self {
        Self {
            gateway,
            config,
            verbosity,
            default_branch: OnceCell::new(),
        }
    }

    /// The repository's default branch, detected on first use.
    ///
    /// A failed detection is not cached; the next call retries.
    pub fn default_branch(&self) -> Result<&DefaultBranch, GitError> {
        if let Some(branch) = self.default_branch.get() {
            return Ok(branch);
        }

        let detected = DefaultBranchDetector::new(self.gateway, self.config.default_branch_names())
            .with_configured(self.config.default_branch().cloned())
            .detect()?;
        output::debug(
            format!("default branch: {} ({:?})", detected, detected.source),
            self.verbosity,
        );

        Ok(self.default_branch.get_or_init(|| detected))
    }
}

/// What tracing a commit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The queried commit is itself a merge; no search was run
    CommitIsMerge { commit: Oid },
    /// The merge (or squash commit) that introduced `commit`
    Found { commit: Oid, outcome: MergeOutcome },
    /// Every strategy came up empty
    NotFound { commit: Oid },
}

impl Resolution {
    /// The full id of the queried commit.
    pub fn queried(&self) -> &Oid {
        match self {
            Resolution::CommitIsMerge { commit }
            | Resolution::Found { commit, .. }
            | Resolution::NotFound { commit } => commit,
        }
    }
}

/// Resolve `reference` and find where it was merged.
///
/// # Errors
///
/// [`GitError::InvalidCommit`] when `reference` names no commit, or any
/// gateway failure met along the way.
pub fn trace(ctx: &Context<'_>, reference: &str) -> Result<Resolution, GitError> {
    let resolver = CommitResolver::new(ctx.gateway);

    let commit = resolver.expand(reference)?;
    output::debug(format!("{} resolved to {}", reference, commit), ctx.verbosity);

    if resolver.is_merge(&commit)? {
        return Ok(Resolution::CommitIsMerge { commit });
    }

    match MergeLocator::new(ctx).find(&commit)? {
        Some(outcome) => Ok(Resolution::Found { commit, outcome }),
        None => Ok(Resolution::NotFound { commit }),
    }
}
