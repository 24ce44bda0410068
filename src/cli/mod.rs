//! cli
//!
//! Command-line interface for git-whence.
//!
//! # Responsibilities
//!
//! - Parse arguments and open the repository
//! - Run the engine and report its result
//! - With `--open`, turn the result into a pull request or commit URL
//! - Map outcomes to exit codes
//!
//! Not being inside a repository, a merge commit as input, a missing merge
//! and an unextractable PR number are expected outcomes: they print a
//! message and exit 1. Everything else is an error and propagates out of
//! `main`.

pub mod args;
pub mod open;

pub use args::Cli;
pub use open::{RecordingOpener, SystemOpener, UrlOpener};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::types::Oid;
use crate::engine::{self, CommitResolver, Context, Resolution};
use crate::forge::github::{origin_slug, WebHost};
use crate::forge::pull_request::{self, PrReference};
use crate::git::{Git, GitError};
use crate::ui::output::{self, Verbosity};

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Merge found and reported or opened
    Found,
    /// Expected failure; the message was already printed
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Found => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<Status> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let cwd = match cli.cwd {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let git = match Git::open(&cwd) {
        Ok(git) => git,
        Err(GitError::NotARepo { .. }) => {
            output::error("Not in a git directory");
            return Ok(Status::Failed);
        }
        Err(e) => return Err(e.into()),
    };

    let config = Config::load(Some(git.git_dir())).context("Failed to load configuration")?;
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), verbosity);
    }

    let opener = SystemOpener::new(config.browser());
    let ctx = Context::new(&git, config, verbosity);

    execute(&ctx, &cli.commit, cli.open, &opener)
}

/// Trace `reference` and report the result.
///
/// Results are printed to stdout unless `open` is set, in which case the
/// pull request (or a commit page) is handed to `opener`.
pub fn execute(
    ctx: &Context<'_>,
    reference: &str,
    open: bool,
    opener: &dyn UrlOpener,
) -> Result<Status> {
    match engine::trace(ctx, reference)? {
        Resolution::CommitIsMerge { commit } => {
            output::warn("Commit is a merge", ctx.verbosity);
            if open {
                open_pull_request(ctx, &commit, opener)?;
            } else {
                report(ctx, &commit)?;
            }
            Ok(Status::Failed)
        }
        Resolution::Found { outcome, .. } => {
            output::debug(
                format!("found by {} strategy", outcome.strategy()),
                ctx.verbosity,
            );
            if open {
                open_pull_request(ctx, outcome.commit(), opener)
            } else {
                report(ctx, outcome.commit())?;
                Ok(Status::Found)
            }
        }
        Resolution::NotFound { commit } => {
            output::warn("Unable to find merge", ctx.verbosity);
            if open {
                let slug = origin_slug(ctx.gateway)?;
                opener.open_url(&web_host(ctx).commit_url(&slug, &commit))?;
            }
            Ok(Status::Failed)
        }
    }
}

/// Print `<short-id> <subject>` for a commit.
fn report(ctx: &Context<'_>, commit: &Oid) -> Result<()> {
    let summary = CommitResolver::new(ctx.gateway).summary(commit)?;
    output::print(summary);
    Ok(())
}

/// Open the pull request named in `merge`'s subject, or the commit page
/// when there is none.
fn open_pull_request(ctx: &Context<'_>, merge: &Oid, opener: &dyn UrlOpener) -> Result<Status> {
    let summary = CommitResolver::new(ctx.gateway).summary(merge)?;
    let slug = origin_slug(ctx.gateway)?;
    let host = web_host(ctx);

    match pull_request::extract(&summary.subject) {
        Some(number) => {
            let url = host.pr_url(&PrReference { slug, number });
            output::debug(format!("opening {}", url), ctx.verbosity);
            opener.open_url(&url)?;
            Ok(Status::Found)
        }
        None => {
            output::warn(
                format!("Unable to find PR number in {}", summary),
                ctx.verbosity,
            );
            opener.open_url(&host.commit_url(&slug, merge))?;
            Ok(Status::Failed)
        }
    }
}

fn web_host(ctx: &Context<'_>) -> WebHost {
    WebHost::new(ctx.config.web_host())
}
