//! engine::branch
//!
//! Inference of the repository's mainline branch.
//!
//! # Order
//!
//! First answer wins:
//!
//! 1. `default_branch` from repo config
//! 2. A recognized name among the tracking branches of `origin` (or the
//!    first remote); sorted, so `main` beats `master`
//! 3. The most recently committed local branch with a recognized name
//! 4. The checked-out branch, or `HEAD` when detached
//!
//! The result is memoized by [`Context`](super::Context); this module only
//! computes it.

use crate::core::types::BranchName;
use crate::git::{GitError, VcsGateway};

/// Remote preferred over all others when present.
const PREFERRED_REMOTE: &str = "origin";

/// How the default branch was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    Configured,
    Remote,
    LocalHistory,
    CurrentBranch,
    DetachedHead,
}

/// The inferred mainline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBranch {
    pub name: BranchName,
    /// Remote the name was found on, if any
    pub remote: Option<String>,
    pub source: DetectionSource,
}

impl DefaultBranch {
    /// Revision expression naming the branch tip.
    ///
    /// Remote-discovered branches are addressed through their tracking ref,
    /// since a local branch of the same name may not exist.
    pub fn revision(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{}/{}", remote, self.name),
            None => self.name.to_string(),
        }
    }
}

impl std::fmt::Display for DefaultBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.revision())
    }
}

/// Infers the default branch from remotes, local history and HEAD.
pub struct DefaultBranchDetector<'g> {
    gateway: &'g dyn VcsGateway,
    candidates: Vec<BranchName>,
    configured: Option<BranchName>,
}

impl<'g> DefaultBranchDetector<'g> {
    /// Create a detector recognizing `candidates` as mainline names.
    pub fn new(gateway: &'g dyn VcsGateway, candidates: Vec<BranchName>) -> Self {
        Self {
            gateway,
            candidates,
            configured: None,
        }
    }

    /// Short-circuit detection with an explicitly configured branch.
    pub fn with_configured(mut self, configured: Option<BranchName>) -> Self {
        self.configured = configured;
        self
    }

    /// Run the heuristics in order.
    pub fn detect(&self) -> Result<DefaultBranch, GitError> {
        if let Some(name) = &self.configured {
            return Ok(DefaultBranch {
                name: name.clone(),
                remote: None,
                source: DetectionSource::Configured,
            });
        }

        if let Some(found) = self.from_remote()? {
            return Ok(found);
        }

        if let Some(found) = self.from_local_history()? {
            return Ok(found);
        }

        self.from_current_branch()
    }

    fn is_candidate(&self, name: &BranchName) -> bool {
        self.candidates.contains(name)
    }

    fn from_remote(&self) -> Result<Option<DefaultBranch>, GitError> {
        let remotes = self.gateway.list_remotes()?;
        let preferred = remotes
            .iter()
            .find(|r| r.as_str() == PREFERRED_REMOTE)
            .or_else(|| remotes.first());
        let Some(remote) = preferred else {
            return Ok(None);
        };

        let mut matches: Vec<BranchName> = self
            .gateway
            .list_remote_tracking_branches(remote)?
            .into_iter()
            .filter(|name| self.is_candidate(name))
            .collect();
        matches.sort();

        Ok(matches.into_iter().next().map(|name| DefaultBranch {
            name,
            remote: Some(remote.clone()),
            source: DetectionSource::Remote,
        }))
    }

    fn from_local_history(&self) -> Result<Option<DefaultBranch>, GitError> {
        let found = self
            .gateway
            .list_local_branches_by_recency()?
            .into_iter()
            .find(|name| self.is_candidate(name));

        Ok(found.map(|name| DefaultBranch {
            name,
            remote: None,
            source: DetectionSource::LocalHistory,
        }))
    }

    fn from_current_branch(&self) -> Result<DefaultBranch, GitError> {
        match self.gateway.current_branch_name()? {
            Some(name) => Ok(DefaultBranch {
                name,
                remote: None,
                source: DetectionSource::CurrentBranch,
            }),
            None => Ok(DefaultBranch {
                name: BranchName::new("HEAD")?,
                remote: None,
                source: DetectionSource::DetachedHead,
            }),
        }
    }
}
