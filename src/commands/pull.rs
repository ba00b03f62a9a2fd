//! # Pull Command Implementation
//!
//! Synchronizes the whole tree with its remotes:
//!
//! - repositories following a branch run `git pull`;
//! - headless submodules are reset to the commit their parent records after
//!   the parent was pulled;
//! - new submodules are initialized and then visited like the others.
//!
//! Every repository must have a clean working tree. A headless root can only
//! be pulled when the commit to move it to is passed on the command line.

use anyhow::Result;
use clap::Args;

use gitr::policies::Pull;

use super::Session;

/// Pull branch-following repositories and move headless submodules to the
/// commit their parent records
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Commit to check out at the root when it is not on a branch
    #[arg(value_name = "COMMIT")]
    pub commit: Option<String>,
}

/// Execute the `pull` command.
pub fn execute(args: PullArgs, session: &Session) -> Result<()> {
    session.traverse(|walk| walk.walk(&mut Pull, args.commit))
}
