//! git-whence binary entry point.

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let status = whence::cli::run()?;
    Ok(status.into())
}
