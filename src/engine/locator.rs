//! engine::locator
//!
//! Finds the merge through which a commit entered the mainline.
//!
//! # Strategies
//!
//! Tried in order; the first validated answer wins and later strategies
//! never run:
//!
//! 1. [`Strategy::Ancestry`]: the merge closest to the commit on the
//!    ancestry path towards `HEAD`, then towards the default branch.
//! 2. [`Strategy::Fuzzy`]: a commit on the default branch with the same
//!    author and subject within the time window stands in for the target
//!    (cherry-picks, rebases), and the ancestry search is repeated for it.
//! 3. [`Strategy::Squash`]: the commit's own subject ends in `(#<n>)`, so it
//!    is its own squash merge.
//!
//! # Validation
//!
//! Every merge candidate must contain the commit it was found for in
//! `merge^..merge`, i.e. on the side the merge brought in. Candidates that
//! fail are discarded and the search moves on.
//!
//! Gateway errors abort the search immediately; only empty answers move
//! the search to the next step.

use crate::core::types::{Oid, TimeWindow};
use crate::forge::pull_request::has_squash_marker;
use crate::git::GitError;
use crate::ui::output;

use super::Context;

/// A search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Ancestry,
    Fuzzy,
    Squash,
}

impl Strategy {
    /// Evaluation order.
    pub const ORDER: [Strategy; 3] = [Strategy::Ancestry, Strategy::Fuzzy, Strategy::Squash];
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Ancestry => "ancestry",
            Strategy::Fuzzy => "fuzzy",
            Strategy::Squash => "squash",
        };
        write!(f, "{}", name)
    }
}

/// A merge paired with the commit it must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    pub merge: Oid,
    /// The commit the merge was found for (the query, or its stand-in)
    pub target: Oid,
}

/// Where a commit came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A confirmed merge commit
    Merge {
        candidate: MergeCandidate,
        strategy: Strategy,
    },
    /// The commit is itself a squash merge
    Squash { commit: Oid },
}

impl MergeOutcome {
    /// The commit to report.
    pub fn commit(&self) -> &Oid {
        match self {
            MergeOutcome::Merge { candidate, .. } => &candidate.merge,
            MergeOutcome::Squash { commit } => commit,
        }
    }

    /// The strategy that produced this outcome.
    pub fn strategy(&self) -> Strategy {
        match self {
            MergeOutcome::Merge { strategy, .. } => *strategy,
            MergeOutcome::Squash { .. } => Strategy::Squash,
        }
    }
}

/// Runs the strategies against one commit.
pub struct MergeLocator<'c, 'g> {
    ctx: &'c Context<'g>,
}

impl<'c, 'g> MergeLocator<'c, 'g> {
    pub fn new(ctx: &'c Context<'g>) -> Self {
        Self { ctx }
    }

    /// Find the merge that introduced `commit`.
    ///
    /// `commit` must be a full id. Returns `Ok(None)` when every strategy
    /// comes up empty.
    pub fn find(&self, commit: &Oid) -> Result<Option<MergeOutcome>, GitError> {
        for strategy in Strategy::ORDER {
            self.debug(format!("trying {} strategy", strategy));
            if let Some(outcome) = self.attempt(strategy, commit)? {
                self.debug(format!("{} strategy found {}", strategy, outcome.commit()));
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    fn attempt(&self, strategy: Strategy, commit: &Oid) -> Result<Option<MergeOutcome>, GitError> {
        let candidate = match strategy {
            Strategy::Ancestry => self.by_ancestry(commit)?,
            Strategy::Fuzzy => self.by_fuzzy_match(commit)?,
            Strategy::Squash => {
                let squash = self.by_squash_marker(commit)?;
                return Ok(squash.map(|commit| MergeOutcome::Squash { commit }));
            }
        };

        Ok(candidate.map(|candidate| MergeOutcome::Merge {
            candidate,
            strategy,
        }))
    }

    fn by_ancestry(&self, commit: &Oid) -> Result<Option<MergeCandidate>, GitError> {
        if let Some(candidate) = self.validated_merge(commit, "HEAD")? {
            return Ok(Some(candidate));
        }

        // Detection only runs once HEAD alone has come up empty
        let default = self.ctx.default_branch()?.revision();
        if default == "HEAD" {
            return Ok(None);
        }
        self.validated_merge(commit, &default)
    }

    fn by_fuzzy_match(&self, commit: &Oid) -> Result<Option<MergeCandidate>, GitError> {
        let gateway = self.ctx.gateway;
        let branch = self.ctx.default_branch()?.revision();

        let meta = gateway.commit_meta(commit)?;
        let window = TimeWindow::around(meta.author_time, self.ctx.config.fuzzy_window_days());
        let key = meta.match_key();

        let stand_in = gateway
            .log_with_date_window(&branch, &window)?
            .into_iter()
            .find(|entry| entry.oid != *commit && entry.match_key() == key);

        match stand_in {
            Some(entry) => {
                self.debug(format!("{} stands in for {}", entry.oid, commit));
                self.validated_merge(&entry.oid, &branch)
            }
            None => Ok(None),
        }
    }

    fn by_squash_marker(&self, commit: &Oid) -> Result<Option<Oid>, GitError> {
        let meta = self.ctx.gateway.commit_meta(commit)?;
        Ok(has_squash_marker(&meta.subject).then(|| commit.clone()))
    }

    /// Ancestry search towards `branch`, followed by validation.
    fn validated_merge(
        &self,
        commit: &Oid,
        branch: &str,
    ) -> Result<Option<MergeCandidate>, GitError> {
        let Some(candidate) = self.closest_merge(commit, branch)? else {
            return Ok(None);
        };

        if self.confirm(&candidate)? {
            Ok(Some(candidate))
        } else {
            self.debug(format!(
                "discarding {}: {} is not in its merged range",
                candidate.merge, candidate.target
            ));
            Ok(None)
        }
    }

    /// The merge on the ancestry path from `commit` to `branch` that is
    /// closest to `commit`.
    fn closest_merge(
        &self,
        commit: &Oid,
        branch: &str,
    ) -> Result<Option<MergeCandidate>, GitError> {
        let merges = self.ctx.gateway.log_ancestry_merges(commit, branch)?;
        self.debug(format!("{} merge(s) between {} and {}", merges.len(), commit, branch));

        // Newest first, so the closest merge is last
        Ok(merges.last().map(|merge| MergeCandidate {
            merge: merge.clone(),
            target: commit.clone(),
        }))
    }

    /// Whether `candidate.target` is in `merge^..merge`.
    pub fn confirm(&self, candidate: &MergeCandidate) -> Result<bool, GitError> {
        let merge = candidate.merge.as_str();
        let introduced = self
            .ctx
            .gateway
            .log_range(&format!("{}^", merge), merge)?;
        Ok(introduced.contains(&candidate.target))
    }

    fn debug(&self, message: String) {
        output::debug(message, self.ctx.verbosity);
    }
}
