//! forge::github
//!
//! Web URLs for commits and pull requests on a GitHub-style host.
//!
//! # Design
//!
//! URL composition is pure string work against a base host
//! (`https://github.com` unless configured otherwise). The only repository
//! query is reading the `origin` remote URL to learn the `owner/repo` slug,
//! and a missing `origin` is a hard error: there is nowhere to send the user.
//!
//! # Example
//!
//! ```
//! use whence::forge::github::{parse_origin_slug, WebHost};
//!
//! let slug = parse_origin_slug("git@github.com:foobar/barbaz.git").unwrap();
//! assert_eq!(slug, "foobar/barbaz");
//!
//! let host = WebHost::default();
//! assert_eq!(
//!     host.pull_url(&slug, 10486),
//!     "https://github.com/foobar/barbaz/pull/10486"
//! );
//! ```

use crate::core::config::DEFAULT_WEB_HOST;
use crate::core::types::Oid;
use crate::git::{GitError, VcsGateway};

use super::pull_request::PrReference;

/// Remote whose URL identifies the hosted repository.
pub const ORIGIN: &str = "origin";

/// Base URL of a hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebHost {
    base: String,
}

impl Default for WebHost {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_HOST)
    }
}

impl WebHost {
    /// Create a host from its base URL; a trailing slash is ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of pull request `number` in `slug`.
    pub fn pull_url(&self, slug: &str, number: u64) -> String {
        format!("{}/{}/pull/{}", self.base, slug, number)
    }

    /// URL of commit `sha` in `slug`.
    pub fn commit_url(&self, slug: &str, sha: &Oid) -> String {
        format!("{}/{}/commit/{}", self.base, slug, sha)
    }

    /// URL of a resolved pull request.
    pub fn pr_url(&self, pr: &PrReference) -> String {
        self.pull_url(&pr.slug, pr.number)
    }
}

/// Extract `owner/repo` from a remote URL.
///
/// Accepts SSH (`git@host:owner/repo.git`) and HTTPS
/// (`https://host/owner/repo`) forms. A trailing `.git` is dropped and the
/// last two `/`- or `:`-separated segments are joined. Returns `None` when
/// fewer than two segments remain.
pub fn parse_origin_slug(remote_url: &str) -> Option<String> {
    let trimmed = remote_url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let segments: Vec<&str> = trimmed
        .split(['/', ':'])
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        [.., owner, repo] => Some(format!("{}/{}", owner, repo)),
        _ => None,
    }
}

/// Read the `origin` remote and return its `owner/repo` slug.
///
/// # Errors
///
/// [`GitError::RemoteNotFound`] when no `origin` is configured, or when its
/// URL has no `owner/repo` shape.
pub fn origin_slug(gateway: &dyn VcsGateway) -> Result<String, GitError> {
    let url = gateway
        .remote_url(ORIGIN)?
        .ok_or_else(|| GitError::RemoteNotFound {
            name: ORIGIN.to_string(),
        })?;

    parse_origin_slug(&url).ok_or_else(|| GitError::Internal {
        message: format!("cannot determine owner/repo from remote url '{}'", url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockGateway;

    mod parse_origin_slug {
        use super::*;

        #[test]
        fn ssh_url() {
            assert_eq!(
                parse_origin_slug("git@github.com:foobar/barbaz.git"),
                Some("foobar/barbaz".to_string())
            );
        }

        #[test]
        fn https_url() {
            assert_eq!(
                parse_origin_slug("https://github.com/foobar/barbaz"),
                Some("foobar/barbaz".to_string())
            );
            assert_eq!(
                parse_origin_slug("https://github.com/foobar/barbaz.git"),
                Some("foobar/barbaz".to_string())
            );
        }

        #[test]
        fn other_hosts_and_nested_paths() {
            assert_eq!(
                parse_origin_slug("ssh://git@gitlab.example.com:2222/group/sub/proj.git"),
                Some("sub/proj".to_string())
            );
            assert_eq!(
                parse_origin_slug("https://github.com/foobar/barbaz/"),
                Some("foobar/barbaz".to_string())
            );
        }

        #[test]
        fn too_short() {
            assert_eq!(parse_origin_slug("barbaz"), None);
            assert_eq!(parse_origin_slug(""), None);
        }
    }

    mod urls {
        use super::*;

        #[test]
        fn pull_and_commit_urls() {
            let host = WebHost::default();
            let sha = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();

            assert_eq!(
                host.pull_url("foobar/barbaz", 123),
                "https://github.com/foobar/barbaz/pull/123"
            );
            assert_eq!(
                host.commit_url("foobar/barbaz", &sha),
                "https://github.com/foobar/barbaz/commit/abc123def4567890abc123def4567890abc12345"
            );
        }

        #[test]
        fn custom_host_trailing_slash() {
            let host = WebHost::new("https://git.example.com/");
            let pr = PrReference {
                slug: "a/b".to_string(),
                number: 1,
            };
            assert_eq!(host.pr_url(&pr), "https://git.example.com/a/b/pull/1");
        }
    }

    mod origin_slug {
        use super::*;

        #[test]
        fn reads_origin() {
            let gateway = MockGateway::new().with_remote(
                "origin",
                Some("git@github.com:foobar/barbaz.git"),
                &[],
            );
            assert_eq!(origin_slug(&gateway).unwrap(), "foobar/barbaz");
        }

        #[test]
        fn missing_origin_is_fatal() {
            let gateway =
                MockGateway::new().with_remote("upstream", Some("git@github.com:a/b.git"), &[]);
            assert!(matches!(
                origin_slug(&gateway),
                Err(GitError::RemoteNotFound { name }) if name == "origin"
            ));
        }
    }
}
