//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--open` / `-o`: Open the pull request in a browser
//! - `--help` / `-h`: Show help
//! - `--version` / `-v`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Trace each search step on stderr
//! - `--quiet` / `-q`: Suppress warnings

use clap::Parser;
use std::path::PathBuf;

/// Find the merge and pull request a commit came from, also finding straight cherry-picks.
#[derive(Parser, Debug)]
#[command(name = "git-whence")]
#[command(author, version, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "\
EXAMPLES:
    # Show the merge that brought in a commit
    git-whence 6f2a1c9

    # Open its pull request instead
    git-whence -o 6f2a1c9")]
pub struct Cli {
    /// Commit to trace (hash, branch, tag or other revision)
    #[arg(value_name = "COMMIT")]
    pub commit: String,

    /// Open the pull request (or the commit) in a browser
    #[arg(short, long)]
    pub open: bool,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Run as if git-whence was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Trace each search step on stderr
    #[arg(long)]
    pub debug: bool,

    /// Suppress warnings; results are still printed
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
