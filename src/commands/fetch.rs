//! # Fetch Command Implementation
//!
//! Shorthand for `git fetch --recurse-submodules=yes` at the root.

use anyhow::Result;
use clap::Args;

use gitr::policies;

use super::Session;

/// Fetch the current repository and all submodules from their remotes
#[derive(Args, Debug)]
pub struct FetchArgs {}

/// Execute the `fetch` command.
pub fn execute(_args: FetchArgs, session: &Session) -> Result<()> {
    session.traverse(policies::fetch)
}
