use crate::cli::args::Cli;
use crate::error::Result;
use crate::project_identity;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Print a completion script for `shell` to stdout.
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, project_identity::BINARY_NAME, &mut io::stdout());
    Ok(())
}
