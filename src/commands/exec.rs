//! # Do Command Implementation
//!
//! Runs an arbitrary command line in the root repository and then in every
//! initialized submodule, depth-first. Arguments containing whitespace are
//! quoted before being joined. The run stops at the first repository where
//! the command fails, and `gitr` exits with that command's status.

use anyhow::Result;
use clap::Args;

use gitr::policies::RunEverywhere;

use super::Session;

/// Execute a command in the current repository and every submodule
#[derive(Args, Debug)]
pub struct DoArgs {
    /// The command and its arguments, forwarded verbatim
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

/// Execute the `do` command.
pub fn execute(args: DoArgs, session: &Session) -> Result<()> {
    let mut policy = RunEverywhere::from_args(&args.command);
    session.traverse(|walk| walk.walk(&mut policy, ()))
}
